use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;

use crate::api::models::{BulkRegisterRequest, ReceiveBlockRequest, RegisterNodeRequest};
use crate::blockchain::{Block, ChainSnapshot};
use crate::transaction::Transaction;

/// HTTP client for peer-to-peer calls. Every broadcast is a fan-out of
/// independent requests; an unreachable peer is logged and skipped, never a
/// failure of the whole operation.
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn post_json<T: Serialize>(&self, node_url: &str, path: &str, body: &T) {
        let url = format!("{node_url}/api/v1{path}");
        match self.http.post(&url).json(body).send().await {
            Ok(resp) => debug!("POST {url} -> {}", resp.status()),
            Err(err) => warn!("POST {url} failed, skipping peer: {err}"),
        }
    }

    /// Push a freshly sealed block to every peer's `/receive-new-block/`.
    pub async fn broadcast_block(&self, peers: &[String], block: &Block) {
        let body = ReceiveBlockRequest {
            new_block: block.clone(),
        };
        join_all(
            peers
                .iter()
                .map(|peer| self.post_json(peer, "/receive-new-block/", &body)),
        )
        .await;
    }

    /// Push an already-created transaction to every peer's pending pool.
    pub async fn broadcast_transaction(&self, peers: &[String], transaction: &Transaction) {
        join_all(
            peers
                .iter()
                .map(|peer| self.post_json(peer, "/transaction/receive/", transaction)),
        )
        .await;
    }

    /// Tell every existing peer about a newly registered node.
    pub async fn broadcast_registration(&self, peers: &[String], new_node_url: &str) {
        let body = RegisterNodeRequest {
            new_node_url: new_node_url.to_string(),
        };
        join_all(
            peers
                .iter()
                .map(|peer| self.post_json(peer, "/register-node/", &body)),
        )
        .await;
    }

    /// Send the whole registry (plus our own url) to a newly joined node.
    pub async fn register_bulk(&self, new_node_url: &str, all_network_nodes: Vec<String>) {
        let body = BulkRegisterRequest { all_network_nodes };
        self.post_json(new_node_url, "/register-nodes-bulk/", &body)
            .await;
    }

    /// Fetch every reachable peer's chain + pending pool for reconciliation.
    /// Unreachable or malformed peers are dropped from the result.
    pub async fn fetch_snapshots(&self, peers: &[String]) -> Vec<ChainSnapshot> {
        let fetches = peers.iter().map(|peer| async move {
            let url = format!("{peer}/api/v1/chain/");
            match self.http.get(&url).send().await {
                Ok(resp) => match resp.json::<ChainSnapshot>().await {
                    Ok(snapshot) => Some(snapshot),
                    Err(err) => {
                        warn!("GET {url} returned an unreadable chain, skipping: {err}");
                        None
                    }
                },
                Err(err) => {
                    warn!("GET {url} failed, skipping peer: {err}");
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }
}

impl Default for PeerClient {
    fn default() -> Self {
        Self::new()
    }
}
