//! # Transaction Recorder
//!
//! Create-or-update of the downstream transaction record. A job carrying a
//! transaction id patches the existing record (the replay path); an empty id
//! creates one, and the caller memoizes the assigned id back into the job
//! input so the next invocation patches instead.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{JobRecord, OnChainTransaction, TokenContract};
use crate::workflow::gateways::{NewTransactionRecord, TransactionGateway, TransactionPatch};
use crate::workflow::mint_executor::MINT_AMOUNT;

/// Outcome of a record write.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransaction {
    pub transaction_id: String,
    /// True when a new record was created and its id must be memoized.
    pub created: bool,
}

pub struct TransactionRecorder {
    transactions: Arc<dyn TransactionGateway>,
}

impl TransactionRecorder {
    pub fn new(transactions: Arc<dyn TransactionGateway>) -> Self {
        Self { transactions }
    }

    /// Write the mint result into the downstream record store.
    pub async fn record(
        &self,
        job: &JobRecord,
        contract: &TokenContract,
        tx: &OnChainTransaction,
    ) -> Result<RecordedTransaction> {
        if !job.input.transaction_id.is_empty() {
            debug!(transaction_id = %job.input.transaction_id, "Patching transaction record");
            self.transactions
                .patch(
                    &job.input.transaction_id,
                    TransactionPatch {
                        tx_hash: tx.tx_hash.clone(),
                        nonce: tx.nonce.to_string(),
                        gas_fee: tx.gas_price.clone(),
                        user_id: job.output.user_id.clone(),
                        payment_id: job.input.payment_id.clone(),
                        chain: contract.chain.clone(),
                        chain_network: contract.chain_network.clone(),
                        to_address: contract.address.clone(),
                    },
                )
                .await?;
            return Ok(RecordedTransaction {
                transaction_id: job.input.transaction_id.clone(),
                created: false,
            });
        }

        let id = self
            .transactions
            .create(NewTransactionRecord {
                tx_hash: tx.tx_hash.clone(),
                nonce: tx.nonce.to_string(),
                gas_fee: tx.gas_price.clone(),
                token_id: tx.token_id.clone(),
                amount: MINT_AMOUNT.to_string(),
                contract_id: job.input.contract_id.clone(),
                to_address: contract.address.clone(),
                payment_id: job.input.payment_id.clone(),
                tx_type: job.input.transaction_type.clone(),
                user_id: job.output.user_id.clone(),
                chain: contract.chain.clone(),
                chain_network: contract.chain_network.clone(),
            })
            .await?;
        debug!(transaction_id = %id, "Created transaction record");
        Ok(RecordedTransaction {
            transaction_id: id,
            created: true,
        })
    }
}
