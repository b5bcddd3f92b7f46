use serde::Serialize;

use super::block::Block;
use super::model::Blockchain;
use crate::transaction::Transaction;

/// Every transaction touching an address, plus its net balance
/// (amounts received minus amounts sent).
#[derive(Debug, Serialize)]
pub struct AddressData {
    pub address_transactions: Vec<Transaction>,
    pub address_balance: f64,
}

impl Blockchain {
    /// First block whose hash equals `hash`, scanning in chain order.
    pub fn block_by_hash(&self, hash: &str) -> Option<&Block> {
        self.chain.iter().find(|b| b.hash == hash)
    }

    /// First sealed transaction with the given id, together with the block
    /// that contains it. Pending transactions are not searched.
    pub fn transaction_by_id(&self, transaction_id: &str) -> Option<(&Transaction, &Block)> {
        for block in &self.chain {
            for tx in &block.transactions {
                if tx.transaction_id == transaction_id {
                    return Some((tx, block));
                }
            }
        }
        None
    }

    /// Aggregate history and balance for an address over the whole chain.
    pub fn address_data(&self, address: &str) -> AddressData {
        let mut address_transactions = Vec::new();
        for block in &self.chain {
            for tx in &block.transactions {
                if tx.sender == address || tx.recipient == address {
                    address_transactions.push(tx.clone());
                }
            }
        }

        let mut address_balance = 0.0;
        for tx in &address_transactions {
            if tx.recipient == address {
                address_balance += tx.amount;
            }
            if tx.sender == address {
                address_balance -= tx.amount;
            }
        }

        AddressData {
            address_transactions,
            address_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blockchain::block::{BlockData, hash_block, proof_of_work};
    use crate::blockchain::model::Blockchain;
    use crate::transaction::Transaction;

    fn chain_with(txs_per_block: Vec<Vec<Transaction>>) -> Blockchain {
        let mut bc = Blockchain::new("http://localhost:3001");
        for txs in txs_per_block {
            for tx in txs {
                bc.add_transaction(tx);
            }
            let previous_block_hash = bc.last_block().hash.clone();
            let block_data = BlockData {
                transactions: &bc.pending_transactions,
                index: bc.last_block().index + 1,
            };
            let nonce = proof_of_work(&previous_block_hash, &block_data);
            let hash = hash_block(&previous_block_hash, &block_data, nonce);
            bc.create_new_block(nonce, previous_block_hash, hash);
        }
        bc
    }

    #[test]
    fn block_by_hash_finds_sealed_blocks() {
        let bc = chain_with(vec![vec![Transaction::new(1.0, "a", "b")]]);
        let tail_hash = bc.last_block().hash.clone();

        assert_eq!(bc.block_by_hash(&tail_hash).unwrap().index, 2);
        assert!(bc.block_by_hash("missing").is_none());
    }

    #[test]
    fn transaction_by_id_returns_tx_and_containing_block() {
        let tx = Transaction::new(4.0, "a", "b");
        let id = tx.transaction_id.clone();
        let bc = chain_with(vec![vec![], vec![tx]]);

        let (found, block) = bc.transaction_by_id(&id).unwrap();
        assert_eq!(found.transaction_id, id);
        assert_eq!(block.index, 3);
        assert!(bc.transaction_by_id("nope").is_none());
    }

    #[test]
    fn pending_transactions_are_not_visible_to_lookups() {
        let mut bc = chain_with(vec![]);
        let tx = Transaction::new(4.0, "a", "b");
        let id = tx.transaction_id.clone();
        bc.add_transaction(tx);

        assert!(bc.transaction_by_id(&id).is_none());
    }

    #[test]
    fn address_balance_nets_received_against_sent() {
        let bc = chain_with(vec![vec![
            Transaction::new(10.0, "00", "A"),
            Transaction::new(3.0, "A", "B"),
        ]]);

        let data = bc.address_data("A");
        assert_eq!(data.address_transactions.len(), 2);
        assert_eq!(data.address_balance, 7.0);

        let other = bc.address_data("B");
        assert_eq!(other.address_transactions.len(), 1);
        assert_eq!(other.address_balance, 3.0);
    }

    #[test]
    fn unknown_address_yields_empty_history_and_zero_balance() {
        let bc = chain_with(vec![vec![Transaction::new(1.0, "a", "b")]]);
        let data = bc.address_data("nobody");
        assert!(data.address_transactions.is_empty());
        assert_eq!(data.address_balance, 0.0);
    }
}
