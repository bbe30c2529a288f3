//! # Notification Funnel
//!
//! Builds the outbound payload and guarantees exactly one signed callback per
//! step outcome. Every step path, success or any failure, ends here, so no
//! error leaves a step without an attempted callback.
//!
//! The funnel always re-fetches the downstream transaction record to enrich
//! the payload, even on the failure path. When that very fetch fails it falls
//! back to a minimal payload built from fields already on the job, still
//! signs and sends it, and folds the fetch failure into the returned error
//! next to the original cause. Nothing is dropped.

use std::sync::Arc;

use tracing::warn;

use crate::error::StepError;
use crate::models::{JobRecord, NotificationPayload, NotificationStatus};
use crate::workflow::gateways::TransactionGateway;
use crate::workflow::signer::Signer;
use crate::workflow::types::StepOutcome;

/// Transaction type denoting a pure mint; the notified user id is blanked
/// for these because no end user holds the token yet.
const TX_TYPE_MINT: &str = "Mint";

pub struct NotificationComposer {
    transactions: Arc<dyn TransactionGateway>,
    signer: Signer,
}

impl NotificationComposer {
    pub fn new(transactions: Arc<dyn TransactionGateway>, signer: Signer) -> Self {
        Self {
            transactions,
            signer,
        }
    }

    /// Terminate a step invocation: tag the job with `error_message` (empty
    /// for the happy path), send exactly one signed notification describing
    /// the best known state, and return the enriched job plus the combined
    /// error. The error is `None` iff the original message was empty and the
    /// signed send succeeded.
    pub async fn finish(&self, mut job: JobRecord, error_message: &str) -> StepOutcome {
        if !error_message.is_empty() {
            job.output.record_failure(error_message);
        }

        let record = match self.transactions.get(&job.input.transaction_id).await {
            Ok(record) => record,
            Err(fetch_err) => {
                warn!(
                    transaction_id = %job.input.transaction_id,
                    error = %fetch_err,
                    "Transaction lookup failed while composing callback"
                );
                job.output
                    .extra_info
                    .push_str(&format!("; err for transaction lookup: {fetch_err}"));

                // Best-known-state fallback: fields already on the job.
                let payload = NotificationPayload {
                    status: NotificationStatus::Failed,
                    payment_id: job.input.payment_id.clone(),
                    token_id: job.input.token_id.clone(),
                    external_transaction_id: job.input.external_transaction_id.clone(),
                    ..Default::default()
                };
                let send_note = match self
                    .signer
                    .sign_and_send(&payload, &job.input.callback_url)
                    .await
                {
                    Ok(()) => "ok".to_string(),
                    Err(send_err) => send_err.to_string(),
                };
                return (
                    job,
                    Some(StepError::Composite(format!(
                        "errMsg: {error_message}, transaction lookup err: {fetch_err}, \
                         sign and send: {send_note}"
                    ))),
                );
            }
        };

        let mut payload = NotificationPayload {
            chain: record.chain,
            chain_network: record.chain_network,
            release_symbol: job.input.release_symbol.clone(),
            release_id: job.input.release_id.clone(),
            token_id: job.input.token_id.clone(),
            tx_hash: record.tx_hash,
            gas_fee: record.gas_fee,
            to_address: job.input.to_address.clone(),
            user_id: job.output.user_id.clone(),
            payment_id: job.input.payment_id.clone(),
            external_transaction_id: job.input.external_transaction_id.clone(),
            status: NotificationStatus::Succeeded,
            signature: String::new(),
        };

        if !job.output.is_sufficient() {
            job.output.extra_info.push_str(", not sufficient");
            payload.status = NotificationStatus::Failed;
        }
        if job.input.transaction_type == TX_TYPE_MINT {
            payload.user_id.clear();
        }

        let send = self
            .signer
            .sign_and_send(&payload, &job.input.callback_url)
            .await;

        if error_message.is_empty() {
            return (job, send.err());
        }
        let combined = match send {
            Ok(()) => format!("errMsg: {error_message}"),
            Err(send_err) => format!("errMsg: {error_message}, sign and send err: {send_err}"),
        };
        (job, Some(StepError::Composite(combined)))
    }
}
