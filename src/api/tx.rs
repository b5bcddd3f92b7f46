use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::models::{AppState, NewTransactionRequest, NoteResponse, TransactionAdmittedResponse};
use crate::transaction::Transaction;

/// Create a transaction and admit it to the local pending pool only.
#[post("/transaction/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let tx = Transaction::new(body.amount, body.sender.clone(), body.recipient.clone());
    let transaction_id = tx.transaction_id.clone();

    let block_index = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        bc.add_transaction(tx)
    };

    HttpResponse::Ok().json(TransactionAdmittedResponse {
        note: format!("Transaction will be added to block {block_index}"),
        transaction_id,
        block_index,
    })
}

/// Create a transaction, admit it locally, then fan it out to every peer.
#[post("/transaction/broadcast/")]
pub async fn broadcast_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let tx = Transaction::new(body.amount, body.sender.clone(), body.recipient.clone());
    let transaction_id = tx.transaction_id.clone();

    let (block_index, peers) = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        let block_index = bc.add_transaction(tx.clone());
        (block_index, bc.network_nodes.clone())
    };

    state.client.broadcast_transaction(&peers, &tx).await;

    HttpResponse::Ok().json(TransactionAdmittedResponse {
        note: format!("Transaction broadcast, expected in block {block_index}"),
        transaction_id,
        block_index,
    })
}

/// Admit a transaction already created by a peer. The id is kept as-is so
/// every node indexes the same transaction under the same key.
#[post("/transaction/receive/")]
pub async fn receive_transaction(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    debug!("received peer tx {}", tx.transaction_id);

    let block_index = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        bc.add_transaction(tx)
    };

    HttpResponse::Ok().json(NoteResponse {
        note: format!("Transaction will be added to block {block_index}"),
    })
}
