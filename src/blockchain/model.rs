use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::block::{Block, BlockData, hash_block};
use super::{DIFFICULTY_PREFIX, GENESIS_HASH, GENESIS_NONCE};
use crate::transaction::Transaction;

/// A node's view of another node's ledger: the chain plus the not-yet-sealed
/// transactions. This is what `/chain/` serves and what reconciliation
/// consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
}

/// In-memory proof-of-work ledger owned by a single node process.
///
/// The chain + pending pool pair is the only mutable state; all mutation
/// (seal, admit, replace) must go through one instance behind one lock.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
    /// This node's advertised base url, never present in `network_nodes`.
    pub node_url: String,
    /// Known peers, in registration order.
    pub network_nodes: Vec<String>,
}

impl Blockchain {
    /// Initialize a ledger with its genesis block already sealed.
    pub fn new(node_url: impl Into<String>) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending_transactions: Vec::new(),
            node_url: node_url.into(),
            network_nodes: Vec::new(),
        };
        // Genesis: fixed nonce and sentinel hashes, exempt from PoW.
        bc.create_new_block(GENESIS_NONCE, GENESIS_HASH.into(), GENESIS_HASH.into());
        bc
    }

    /// Seal the current pending pool into a new block and append it.
    ///
    /// The caller supplies the nonce and hashes it obtained from
    /// [`proof_of_work`](super::proof_of_work) and
    /// [`hash_block`](super::hash_block); they are trusted as-is and not
    /// re-verified here.
    pub fn create_new_block(&mut self, nonce: u64, previous_block_hash: String, hash: String) -> &Block {
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: Utc::now().timestamp_millis(),
            transactions: std::mem::take(&mut self.pending_transactions),
            nonce,
            hash,
            previous_block_hash,
        };
        info!(
            "sealed block #{} ({} txs, hash={})",
            block.index,
            block.transactions.len(),
            block.hash
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Return the chain tail.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Admit a transaction into the pending pool. Returns the index the
    /// transaction is expected to land in; this is a hint, not a
    /// reservation.
    pub fn add_transaction(&mut self, transaction: Transaction) -> u64 {
        debug!(
            "admitted tx {} ({} -> {}, amount {})",
            transaction.transaction_id, transaction.sender, transaction.recipient, transaction.amount
        );
        self.pending_transactions.push(transaction);
        self.last_block().index + 1
    }

    /// Full-chain validity check for a candidate chain.
    ///
    /// The genesis block must carry the fixed nonce/sentinel fields and no
    /// transactions. Every later block must hash (with its stored nonce) to
    /// a digest with the difficulty prefix and must link to its
    /// predecessor's stored hash. The stored `hash` field itself is trusted
    /// for linkage and not compared against the recomputed digest.
    pub fn is_valid_chain(chain: &[Block]) -> bool {
        let Some(genesis) = chain.first() else {
            return false;
        };
        if genesis.nonce != GENESIS_NONCE
            || genesis.previous_block_hash != GENESIS_HASH
            || genesis.hash != GENESIS_HASH
            || !genesis.transactions.is_empty()
        {
            return false;
        }

        for i in 1..chain.len() {
            let current = &chain[i];
            let prev = &chain[i - 1];
            let recomputed = hash_block(
                &prev.hash,
                &BlockData {
                    transactions: &current.transactions,
                    index: current.index,
                },
                current.nonce,
            );
            if !recomputed.starts_with(DIFFICULTY_PREFIX) || current.previous_block_hash != prev.hash {
                return false;
            }
        }
        true
    }

    /// Overwrite this ledger's chain and pending pool wholesale. The caller
    /// (reconciliation) is responsible for validation and length comparison.
    pub fn replace_chain(&mut self, chain: Vec<Block>, pending_transactions: Vec<Transaction>) {
        info!(
            "chain replaced: {} -> {} blocks",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
        self.pending_transactions = pending_transactions;
    }

    /// Accept an externally mined block iff it extends the current tail:
    /// its parent link must equal the tail's hash and its index must be the
    /// next one. On acceptance the block is appended and the pending pool
    /// cleared; on rejection nothing changes.
    pub fn receive_block(&mut self, block: Block) -> bool {
        let last = self.last_block();
        if block.previous_block_hash != last.hash || block.index != last.index + 1 {
            return false;
        }
        info!("accepted peer block #{} (hash={})", block.index, block.hash);
        self.chain.push(block);
        self.pending_transactions.clear();
        true
    }

    /// Longest-valid-chain reconciliation over peer snapshots.
    ///
    /// Scans peers in order, tracking a single best candidate: a snapshot
    /// becomes the candidate only when its chain is strictly longer than the
    /// running maximum (which starts at our own length). The final candidate
    /// is adopted only if it passes [`Self::is_valid_chain`]; otherwise the
    /// local chain is retained. Returns whether a replacement happened.
    ///
    /// Ties never replace, so the chain length never decreases. Length is
    /// the only weight; there is no cumulative-work comparison.
    pub fn reconcile(&mut self, snapshots: Vec<ChainSnapshot>) -> bool {
        let mut max_length = self.chain.len();
        let mut candidate: Option<ChainSnapshot> = None;

        for snapshot in snapshots {
            if snapshot.chain.len() > max_length {
                max_length = snapshot.chain.len();
                candidate = Some(snapshot);
            }
        }

        match candidate {
            Some(best) if Self::is_valid_chain(&best.chain) => {
                self.replace_chain(best.chain, best.pending_transactions);
                true
            }
            Some(_) => {
                info!("longest peer chain failed validation, keeping own chain");
                false
            }
            None => false,
        }
    }

    /// Record a peer url. Own url and duplicates are ignored. Returns
    /// whether the registry changed.
    pub fn register_node(&mut self, node_url: &str) -> bool {
        if node_url == self.node_url || self.network_nodes.iter().any(|n| n == node_url) {
            return false;
        }
        self.network_nodes.push(node_url.to_string());
        true
    }
}
