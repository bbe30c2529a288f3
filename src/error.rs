//! # Step Error Taxonomy
//!
//! Structured errors for step execution and the guaranteed-notification funnel.
//!
//! Every failure inside a step is translated into one of these kinds, rendered
//! into a human-readable audit message on the job record, and reported through
//! a best-effort signed callback. Callback-path failures are merged into the
//! original error as a [`StepError::Composite`], never dropped and never
//! replacing the original cause.

use thiserror::Error;

/// Errors produced by step execution and callback delivery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    /// Malformed inbound job or unparseable identifier.
    #[error("parse error: {0}")]
    Parse(String),

    /// A lookup returned no result.
    #[error("not found: {0}")]
    NotFound(String),

    /// A business validity check failed (unsupported protocol, empty mint
    /// hash, unparseable timestamp or decimal, missing expiry).
    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator call failed (repository, mint client, ledger).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Key fetch, signing, or callback delivery failed.
    #[error("sign and send error: {0}")]
    SignAndSend(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Multiple failures folded together by the notification funnel.
    #[error("{0}")]
    Composite(String),
}

pub type Result<T> = std::result::Result<T, StepError>;
