//! # Workflow Core
//!
//! Step execution and guaranteed notification for the fulfillment pipeline.
//!
//! ## Architecture
//!
//! The external orchestrator, a durable state machine with at-least-once
//! delivery, invokes one named step per call and carries a single mutable
//! job record forward. This module provides:
//!
//! - **WorkflowRegistry**: the named map of step implementations the
//!   orchestrator adapter dispatches on
//! - **MintStep**: resolves the mint target, performs the mint, persists the
//!   downstream transaction record
//! - **NotificationComposer**: the funnel guaranteeing exactly one signed
//!   callback per terminal outcome
//! - **Signer**: key retrieval, Ed25519 signing, and single-shot delivery
//! - **ContractResolver / MintExecutor / TransactionRecorder**: the mint
//!   pipeline's collaborator-facing pieces
//! - **validity**: stateless expiry and balance-sufficiency predicates shared
//!   across steps
//!
//! Collaborator seams live in [`gateways`]; all engine internals behind them
//! are out of scope for this crate.

pub mod contract_resolver;
pub mod gateways;
pub mod issuance_step;
pub mod mint_executor;
pub mod mint_step;
pub mod notification;
pub mod recorder;
pub mod registry;
pub mod signer;
pub mod types;
pub mod validity;

pub use contract_resolver::{ContractResolver, ResolvedContract};
pub use gateways::{
    AccountQuery, CallbackTransport, ContractCriteria, ContractInfo, ContractRepository,
    HttpCallbackTransport, LedgerGateway, MintClient, MintReceipt, NewTransactionRecord,
    ParameterStore, TransactionGateway, TransactionPatch, TransactionRecord,
};
pub use issuance_step::IssuanceBalanceStep;
pub use mint_executor::{MintExecutor, MINT_AMOUNT, UNBOUNDED_GAS};
pub use mint_step::MintStep;
pub use notification::NotificationComposer;
pub use recorder::{RecordedTransaction, TransactionRecorder};
pub use registry::WorkflowRegistry;
pub use signer::Signer;
pub use types::{StepName, StepOutcome, WorkflowStep};
pub use validity::{check_account_balance, check_order_expiry, check_timestamp};
