use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value transfer between two opaque addresses.
///
/// There is no authentication layer: any well-formed
/// (amount, sender, recipient) tuple is accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub sender: String,
    pub recipient: String,
    /// Stable identifier assigned at creation time (UUIDv4, hyphens stripped).
    pub transaction_id: String,
}

impl Transaction {
    /// Build a transaction with a fresh unique id.
    pub fn new(amount: f64, sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            amount,
            sender: sender.into(),
            recipient: recipient.into(),
            transaction_id: Uuid::new_v4().simple().to_string(),
        }
    }
}
