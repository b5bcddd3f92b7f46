use actix_web::{HttpResponse, Responder, get, web};

use super::models::{
    AddressLookupResponse, AppState, BlockLookupResponse, TransactionLookupResponse,
};

/// First block whose hash matches. Absent hashes answer 200 with `null`.
#[get("/block/{block_hash}/")]
pub async fn get_block(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let block_hash = path.into_inner().0;
    let bc = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(BlockLookupResponse {
        block: bc.block_by_hash(&block_hash).cloned(),
    })
}

/// A sealed transaction by id, together with its containing block.
#[get("/transaction/{transaction_id}/")]
pub async fn get_transaction(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let transaction_id = path.into_inner().0;
    let bc = state.ledger.lock().expect("mutex poisoned");
    let found = bc.transaction_by_id(&transaction_id);
    HttpResponse::Ok().json(TransactionLookupResponse {
        transaction: found.map(|(tx, _)| tx.clone()),
        block: found.map(|(_, block)| block.clone()),
    })
}

/// Full transaction history and net balance for an address.
#[get("/address/{address}/")]
pub async fn get_address(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let address = path.into_inner().0;
    let bc = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(AddressLookupResponse {
        address_data: bc.address_data(&address),
    })
}
