//! # Job Record
//!
//! The single mutable record the external orchestrator carries across step
//! invocations. One state-machine execution is triggered against one order;
//! each step receives the record, mutates it once, and hands it back.
//!
//! ## Replay invariant
//!
//! Resolved identifiers (`contract_id`, `transaction_id`) are written back
//! into [`JobInput`] so a re-invoked step skips re-resolution. The record is
//! the only state that crosses the at-least-once invocation boundary.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StepError};

/// Success marker carried through the pipeline in [`JobOutput::status`].
pub const STATUS_SUFFICIENT: &str = "sufficient";

/// Error marker; a job in this status is left for manual remediation.
pub const STATUS_ERROR: &str = "error";

/// Near-immutable request fields of a job.
///
/// Only the memoized identifiers (`contract_id`, `transaction_id`) are
/// written by steps; everything else is set by the orchestrator when the
/// order enters the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    pub order_id: String,
    pub payment_id: String,
    pub contract_id: String,
    pub ownership_id: String,
    pub transaction_id: String,
    pub token_id: String,
    pub template_url: String,
    pub release_symbol: String,
    pub release_id: String,
    pub to_address: String,
    pub transaction_type: String,
    pub callback_url: String,
    pub product_code: String,
    pub external_transaction_id: String,
    pub token_name: String,
    pub token_description: String,
    pub attributes: Vec<Attribute>,
}

/// Token metadata attribute attached to the minted token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "trait_type", skip_serializing_if = "Option::is_none")]
    pub trait_type: Option<String>,
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(rename = "display_type", skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Mutable progress fields of a job.
///
/// `extra_info` is an append-only audit trail; failure messages accumulate,
/// they never overwrite earlier entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobOutput {
    pub status: String,
    pub tx_hash: String,
    pub currency_id: String,
    pub user_id: String,
    pub time_stamp: String,
    pub extra_info: String,
}

impl JobOutput {
    /// Whether the job currently carries the pipeline success marker.
    pub fn is_sufficient(&self) -> bool {
        self.status == STATUS_SUFFICIENT
    }

    /// Append a message to the audit trail and mark the job failed.
    pub fn record_failure(&mut self, message: &str) {
        self.status = STATUS_ERROR.to_string();
        self.extra_info.push_str(message);
    }
}

/// The job record a step receives and returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub input: JobInput,
    pub output: JobOutput,
}

impl JobRecord {
    /// Decode a raw orchestrator payload into a typed job record.
    ///
    /// A decode failure is its own error kind, not a generic type mismatch;
    /// the caller funnels it through the notification path without attempting
    /// any side effect.
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        serde_json::from_value(raw)
            .map_err(|e| StepError::Parse(format!("cannot parse job payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_record_wire_shape_round_trip() {
        let raw = serde_json::json!({
            "input": {
                "orderId": "ord-1",
                "paymentId": "pay-1",
                "contractId": "",
                "tokenId": "42",
                "transactionType": "Mint",
                "callbackUrl": "https://example.test/callback",
                "attributes": [
                    {"trait_type": "edition", "value": 1}
                ]
            },
            "output": {
                "status": "sufficient",
                "currencyId": "USD-TOKEN",
                "timeStamp": "2026-01-01T00:00:00Z"
            }
        });

        let job = JobRecord::from_value(raw).unwrap();
        assert_eq!(job.input.order_id, "ord-1");
        assert_eq!(job.input.token_id, "42");
        assert_eq!(job.input.attributes[0].trait_type.as_deref(), Some("edition"));
        assert!(job.output.is_sufficient());
        assert_eq!(job.output.currency_id, "USD-TOKEN");

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["input"]["orderId"], "ord-1");
        assert_eq!(back["output"]["timeStamp"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_from_value_rejects_mismatched_shape() {
        let raw = serde_json::json!({"input": {"attributes": "not-a-list"}});
        let err = JobRecord::from_value(raw).unwrap_err();
        assert!(matches!(err, StepError::Parse(_)));
    }

    #[test]
    fn test_record_failure_appends_to_trail() {
        let mut output = JobOutput {
            extra_info: "earlier; ".to_string(),
            ..Default::default()
        };
        output.record_failure("mint failed");
        assert_eq!(output.status, STATUS_ERROR);
        assert_eq!(output.extra_info, "earlier; mint failed");
    }
}
