//! On-chain mint result as the step sees it before the downstream record is
//! written. An empty transaction hash means "not created", even when the
//! mint client reported no error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an on-chain transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnChainTxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Result of a mint dispatch, keyed to the contract it ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnChainTransaction {
    pub tx_hash: String,
    pub contract_id: Uuid,
    pub token_id: String,
    pub nonce: u64,
    /// Decimal string; gas prices exceed u64 range on some networks.
    pub gas_price: String,
    pub status: OnChainTxStatus,
}

impl OnChainTransaction {
    /// Whether the chain actually accepted the transaction.
    pub fn is_created(&self) -> bool {
        !self.tx_hash.is_empty()
    }
}
