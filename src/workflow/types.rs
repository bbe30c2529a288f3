//! # Workflow Step Types
//!
//! The uniform step capability every pipeline stage exposes, and the closed
//! set of step names the orchestrator dispatches on.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StepError;
use crate::models::JobRecord;

/// The names the external orchestrator invokes steps by.
///
/// Closed set: dispatch is a tagged enum, not a free-form string, so an
/// unknown name is rejected at the registry boundary rather than deep inside
/// a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepName {
    Order,
    Payment,
    Artwork,
    Mint,
    Withdraw,
    Exchange,
    IssuanceBalance,
    Finalize,
}

impl StepName {
    pub const ALL: [StepName; 8] = [
        StepName::Order,
        StepName::Payment,
        StepName::Artwork,
        StepName::Mint,
        StepName::Withdraw,
        StepName::Exchange,
        StepName::IssuanceBalance,
        StepName::Finalize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::Order => "Order",
            StepName::Payment => "Payment",
            StepName::Artwork => "Artwork",
            StepName::Mint => "Mint",
            StepName::Withdraw => "Withdraw",
            StepName::Exchange => "Exchange",
            StepName::IssuanceBalance => "IssuanceBalance",
            StepName::Finalize => "Finalize",
        }
    }

    /// Parse an orchestrator-provided step name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step invocation hands back: the enriched job record plus the
/// composite error, `None` only on the fully happy path. The record is
/// returned on every path; failures still carry the audit trail and any
/// memoized identifiers forward to the next invocation.
pub type StepOutcome = (JobRecord, Option<StepError>);

/// The uniform capability a pipeline step exposes.
///
/// One job, one step, one sequential call chain per invocation. Cancellation
/// follows the caller: dropping the returned future aborts in-flight
/// collaborator calls.
#[async_trait]
pub trait WorkflowStep: Send + Sync {
    async fn process(&self, job: JobRecord) -> StepOutcome;
}

impl fmt::Debug for dyn WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WorkflowStep")
    }
}
