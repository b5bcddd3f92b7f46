use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{
    AppState, ChainResponse, ConsensusResponse, MineResponse, NoteResponse, ReceiveBlockRequest,
    ReceiveBlockResponse,
};
use crate::blockchain::{BlockData, MINING_REWARD, REWARD_SENDER, hash_block, proof_of_work};
use crate::transaction::Transaction;

/// Full ledger state: chain, pending pool and peer registry.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        length: bc.chain.len(),
        chain: bc.chain.clone(),
        pending_transactions: bc.pending_transactions.clone(),
        network_nodes: bc.network_nodes.clone(),
        node_url: bc.node_url.clone(),
    })
}

/// Run the proof-of-work search over the pending pool, seal the block,
/// broadcast it to every peer, then queue + broadcast the mining reward for
/// the next block.
///
/// The ledger lock is held across the search on purpose: admission and
/// sealing serialize, so the pool hashed is exactly the pool sealed.
#[post("/mine/")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let (block, peers) = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        let previous_block_hash = bc.last_block().hash.clone();
        let block_data = BlockData {
            transactions: &bc.pending_transactions,
            index: bc.last_block().index + 1,
        };
        let nonce = proof_of_work(&previous_block_hash, &block_data);
        let hash = hash_block(&previous_block_hash, &block_data, nonce);
        let block = bc.create_new_block(nonce, previous_block_hash, hash).clone();
        (block, bc.network_nodes.clone())
    };

    state.client.broadcast_block(&peers, &block).await;

    // Reward lands in the next block, not the one just sealed.
    let reward = Transaction::new(MINING_REWARD, REWARD_SENDER, state.node_address.clone());
    {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        bc.add_transaction(reward.clone());
    }
    state.client.broadcast_transaction(&peers, &reward).await;

    info!(
        "mined block #{} (nonce={}, hash={})",
        block.index, block.nonce, block.hash
    );
    HttpResponse::Ok().json(MineResponse {
        note: "New block mined & broadcast successfully".to_string(),
        block,
    })
}

/// Accept a block pushed by a peer iff it extends our tail.
#[post("/receive-new-block/")]
pub async fn receive_new_block(
    state: web::Data<AppState>,
    body: web::Json<ReceiveBlockRequest>,
) -> impl Responder {
    let new_block = body.into_inner().new_block;

    let accepted = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        bc.receive_block(new_block.clone())
    };

    if accepted {
        HttpResponse::Ok().json(ReceiveBlockResponse {
            note: "New block received and accepted".to_string(),
            new_block,
        })
    } else {
        warn!(
            "rejected peer block #{} (hash={}): does not extend the tail",
            new_block.index, new_block.hash
        );
        HttpResponse::BadRequest().json(NoteResponse {
            note: "New block rejected".to_string(),
        })
    }
}

/// Longest-valid-chain reconciliation against every registered peer.
/// Unreachable peers are skipped; "not replaced" is the normal outcome when
/// nobody has a strictly longer valid chain.
#[get("/consensus/")]
pub async fn consensus(state: web::Data<AppState>) -> impl Responder {
    let peers = {
        let bc = state.ledger.lock().expect("mutex poisoned");
        bc.network_nodes.clone()
    };

    let snapshots = state.client.fetch_snapshots(&peers).await;
    info!(
        "consensus: {} of {} peers answered",
        snapshots.len(),
        peers.len()
    );

    let (replaced, chain, pending_transactions) = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        let replaced = bc.reconcile(snapshots);
        (replaced, bc.chain.clone(), bc.pending_transactions.clone())
    };

    let note = if replaced {
        "This chain has been replaced".to_string()
    } else {
        "Current chain has not been replaced".to_string()
    };
    HttpResponse::Ok().json(ConsensusResponse {
        note,
        chain,
        pending_transactions,
    })
}
