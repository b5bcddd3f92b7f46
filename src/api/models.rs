use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::blockchain::{AddressData, Block, Blockchain};
use crate::network::PeerClient;
use crate::transaction::Transaction;

/// Shared application state: the ledger behind a single lock (all mutation
/// serializes through it, including the PoW search) plus this node's mining
/// address and the peer HTTP client.
pub struct AppState {
    pub ledger: Mutex<Blockchain>,
    /// Address credited with mining rewards; a fresh uuid per process.
    pub node_address: String,
    pub client: PeerClient,
}

impl AppState {
    pub fn new(node_url: String, node_address: String) -> Self {
        Self {
            ledger: Mutex::new(Blockchain::new(node_url)),
            node_address,
            client: PeerClient::new(),
        }
    }
}

/* ---------- Shared ---------- */

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: String,
}

/* ---------- Chain / Mining ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
    pub network_nodes: Vec<String>,
    pub node_url: String,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub note: String,
    pub block: Block,
}

/// Wire shape of a block push; also serialized by the peer client.
#[derive(Serialize, Deserialize)]
pub struct ReceiveBlockRequest {
    pub new_block: Block,
}

#[derive(Serialize)]
pub struct ReceiveBlockResponse {
    pub note: String,
    pub new_block: Block,
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub note: String,
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
}

/* ---------- Transactions ---------- */

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub amount: f64,
    pub sender: String,
    pub recipient: String,
}

#[derive(Serialize)]
pub struct TransactionAdmittedResponse {
    pub note: String,
    pub transaction_id: String,
    /// Index the transaction is expected to land in. A hint, not a
    /// reservation.
    pub block_index: u64,
}

/* ---------- Peer registry ---------- */

#[derive(Serialize, Deserialize)]
pub struct RegisterNodeRequest {
    pub new_node_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct BulkRegisterRequest {
    pub all_network_nodes: Vec<String>,
}

/* ---------- Lookups ---------- */

#[derive(Serialize)]
pub struct BlockLookupResponse {
    pub block: Option<Block>,
}

#[derive(Serialize)]
pub struct TransactionLookupResponse {
    pub transaction: Option<Transaction>,
    pub block: Option<Block>,
}

#[derive(Serialize)]
pub struct AddressLookupResponse {
    pub address_data: AddressData,
}
