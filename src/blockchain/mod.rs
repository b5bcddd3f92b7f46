pub mod block;
pub mod lookup;
pub mod model;

pub use block::{Block, BlockData, hash_block, proof_of_work};
pub use lookup::AddressData;
pub use model::{Blockchain, ChainSnapshot};

/// Required hex prefix of a valid block hash. Fixed, never retargeted.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Nonce of the genesis block (exempt from Proof-of-Work).
pub const GENESIS_NONCE: u64 = 100;

/// Sentinel used for both the genesis block's own hash and its parent link.
pub const GENESIS_HASH: &str = "0";

/// Reward paid to the mining node, admitted to the pool after each seal.
pub const MINING_REWARD: f64 = 12.5;

/// Sender address of reward transactions.
pub const REWARD_SENDER: &str = "00";
