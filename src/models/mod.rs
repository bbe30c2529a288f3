//! # Data Layer
//!
//! The shared data model carried through the fulfillment pipeline: the job
//! record that crosses the orchestrator's at-least-once invocation boundary,
//! the read-only token contract, the on-chain mint result, the signed
//! notification payload, and the consumed ledger account shape.

pub mod contract;
pub mod job;
pub mod ledger;
pub mod notification;
pub mod transaction;

pub use contract::{ContractProtocol, TokenContract};
pub use job::{Attribute, JobInput, JobOutput, JobRecord, STATUS_ERROR, STATUS_SUFFICIENT};
pub use ledger::{AccountCategory, LedgerAccount};
pub use notification::{NotificationPayload, NotificationStatus, SignatureKey};
pub use transaction::{OnChainTransaction, OnChainTxStatus};
