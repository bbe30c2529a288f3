//! # Contract Resolver
//!
//! Locates the mint target for a job. Resolution is a pure function of the
//! record's prior state: an empty contract id triggers a currency lookup, a
//! populated one a direct lookup, and the result carries an explicit
//! `already_resolved` flag so the caller knows whether to memoize the id back
//! into the job input.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StepError};
use crate::models::TokenContract;
use crate::workflow::gateways::{ContractCriteria, ContractRepository};

/// A resolved mint target plus how it was found.
#[derive(Debug, Clone)]
pub struct ResolvedContract {
    pub contract: TokenContract,
    /// True when the job already carried the contract id; a replayed
    /// invocation takes this path and never re-runs the currency search.
    pub already_resolved: bool,
}

pub struct ContractResolver {
    contracts: Arc<dyn ContractRepository>,
}

impl ContractResolver {
    pub fn new(contracts: Arc<dyn ContractRepository>) -> Self {
        Self { contracts }
    }

    /// Resolve the mint target from the job's contract id or, when empty,
    /// from the currency id.
    pub async fn resolve(&self, contract_id: &str, currency_id: &str) -> Result<ResolvedContract> {
        if contract_id.is_empty() {
            debug!(currency_id = %currency_id, "Resolving contract by currency");
            let contract = self
                .contracts
                .find_one(&ContractCriteria {
                    currency_id: currency_id.to_string(),
                })
                .await?;
            return Ok(ResolvedContract {
                contract,
                already_resolved: false,
            });
        }

        let id = Uuid::parse_str(contract_id)
            .map_err(|e| StepError::Parse(format!("cannot parse contract id {contract_id}: {e}")))?;
        debug!(contract_id = %id, "Resolving contract by id");
        let contract = self.contracts.find_by_id(id).await?;
        Ok(ResolvedContract {
            contract,
            already_resolved: true,
        })
    }
}
