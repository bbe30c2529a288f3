//! # Mintflow Core
//!
//! Step-execution and guaranteed-notification core for the token fulfillment
//! pipeline.
//!
//! ## Overview
//!
//! An external durable orchestrator turns a purchase order into a minted
//! on-chain token by invoking one named step at a time, at least once,
//! carrying a single mutable job record across invocations. This crate
//! implements the step core: contract resolution, the mint side effect, the
//! idempotent downstream record write, and the funnel that guarantees exactly
//! one cryptographically signed callback per terminal outcome: success or
//! any failure, including failures hit while looking up the very transaction
//! the callback describes.
//!
//! ## Module Organization
//!
//! - [`models`] - Job record, token contract, mint result, notification
//!   payload, ledger account
//! - [`workflow`] - Steps, registry, funnel, signer, and collaborator seams
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error taxonomy
//! - [`logging`] - Structured tracing bootstrap and helpers
//!
//! ## Guarantees
//!
//! - Every terminal step outcome produces exactly one signed callback
//! - Resolved identifiers are memoized into the job record so replays skip
//!   re-resolution
//! - Callback-path failures merge into the original error, never replace it
//! - No raw error escapes a step without an attempted callback
//!
//! The mint side effect itself is not deduplicated across retries; that risk
//! is owned by the external system.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod workflow;

pub use config::MintflowConfig;
pub use error::{Result, StepError};
pub use models::{
    Attribute, ContractProtocol, JobInput, JobOutput, JobRecord, LedgerAccount,
    NotificationPayload, NotificationStatus, OnChainTransaction, OnChainTxStatus, TokenContract,
    STATUS_ERROR, STATUS_SUFFICIENT,
};
pub use workflow::{
    IssuanceBalanceStep, MintStep, StepName, StepOutcome, WorkflowRegistry, WorkflowStep,
};
