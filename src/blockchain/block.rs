use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::DIFFICULTY_PREFIX;
use crate::transaction::Transaction;

/// A single block in the chain holding a batch of transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    /// Creation time in UTC milliseconds. Informational only, not validated.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub hash: String,
    pub previous_block_hash: String,
}

/// The hashed portion of a candidate block: the transactions it will carry
/// plus the index it will be sealed at. Field order is the hash preimage
/// order and must not change.
#[derive(Debug, Serialize)]
pub struct BlockData<'a> {
    pub transactions: &'a [Transaction],
    pub index: u64,
}

/// Compute the SHA-256 digest of a block as hex: the preimage is the
/// previous block hash, the decimal nonce and the JSON form of `block_data`,
/// concatenated. Every node must produce identical digests for identical
/// inputs, so the serialization here is the wire-canonical one.
pub fn hash_block(previous_block_hash: &str, block_data: &BlockData<'_>, nonce: u64) -> String {
    let data_json = serde_json::to_string(block_data).expect("serialize block data");
    let preimage = format!("{previous_block_hash}{nonce}{data_json}");
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// Brute-force the first nonce (counting up from 0) whose block hash starts
/// with [`DIFFICULTY_PREFIX`]. CPU-bound and uninterruptible: the caller's
/// thread is occupied until a nonce is found (~65536 attempts expected for a
/// four-nibble prefix). There is no timeout by design.
pub fn proof_of_work(previous_block_hash: &str, block_data: &BlockData<'_>) -> u64 {
    let mut nonce = 0u64;
    while !hash_block(previous_block_hash, block_data, nonce).starts_with(DIFFICULTY_PREFIX) {
        nonce += 1;
    }
    nonce
}

#[cfg(test)]
mod tests {
    use super::{BlockData, hash_block, proof_of_work};
    use crate::blockchain::DIFFICULTY_PREFIX;
    use crate::transaction::Transaction;

    fn sample_data(txs: &[Transaction]) -> BlockData<'_> {
        BlockData {
            transactions: txs,
            index: 2,
        }
    }

    #[test]
    fn hashing_is_deterministic() {
        let txs = vec![Transaction::new(10.0, "alice", "bob")];
        let data = sample_data(&txs);
        let h1 = hash_block("prev", &data, 42);
        let h2 = hash_block("prev", &data, 42);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn hash_changes_with_any_input() {
        let txs = vec![Transaction::new(10.0, "alice", "bob")];
        let data = sample_data(&txs);
        let base = hash_block("prev", &data, 42);
        assert_ne!(base, hash_block("prev", &data, 43));
        assert_ne!(base, hash_block("other", &data, 42));

        let other_txs = vec![Transaction::new(11.0, "alice", "bob")];
        assert_ne!(base, hash_block("prev", &sample_data(&other_txs), 42));
    }

    #[test]
    fn proof_of_work_finds_first_qualifying_nonce() {
        let txs = vec![Transaction::new(5.0, "carol", "dave")];
        let data = sample_data(&txs);
        let nonce = proof_of_work("prev", &data);

        assert!(hash_block("prev", &data, nonce).starts_with(DIFFICULTY_PREFIX));
        for earlier in 0..nonce {
            assert!(!hash_block("prev", &data, earlier).starts_with(DIFFICULTY_PREFIX));
        }
    }

    #[test]
    fn proof_of_work_on_empty_transactions() {
        let data = BlockData {
            transactions: &[],
            index: 2,
        };
        let nonce = proof_of_work("0", &data);
        assert!(hash_block("0", &data, nonce).starts_with(DIFFICULTY_PREFIX));
    }
}
