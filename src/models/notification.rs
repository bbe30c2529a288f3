//! # Notification Payload
//!
//! The outbound signed message describing a step's terminal outcome. Built
//! fresh per callback, never persisted. The payload is serialized without its
//! signature, signed, then re-serialized with the signature set.

use serde::{Deserialize, Serialize};

/// Outcome reported to the callback consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Succeeded,
    #[default]
    Failed,
}

/// The signed callback body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPayload {
    pub chain: String,
    pub chain_network: String,
    pub release_symbol: String,
    pub release_id: String,
    pub token_id: String,
    pub tx_hash: String,
    pub gas_fee: String,
    pub to_address: String,
    pub user_id: String,
    pub payment_id: String,
    pub external_transaction_id: String,
    pub status: NotificationStatus,
    pub signature: String,
}

impl NotificationPayload {
    /// The exact bytes that get signed: the payload with an empty signature.
    pub fn signing_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut unsigned = self.clone();
        unsigned.signature = String::new();
        serde_json::to_vec(&unsigned)
    }
}

/// Key material fetched from the parameter store, JSON-decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureKey {
    #[serde(rename = "privateKey")]
    pub private_key: String,
}
