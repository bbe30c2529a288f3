//! # Issuance Balance Step
//!
//! The platform-balance gate that runs before minting: verifies the issuance
//! account for the order's currency can absorb one more token issuance.
//! Sufficiency marks the job and lets the pipeline continue; insufficiency or
//! a check failure is terminal and reported through the funnel.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::Arc;

use crate::models::{AccountCategory, JobRecord, STATUS_SUFFICIENT};
use crate::workflow::gateways::{AccountQuery, LedgerGateway};
use crate::workflow::notification::NotificationComposer;
use crate::workflow::types::{StepOutcome, WorkflowStep};
use crate::workflow::validity::check_account_balance;

pub struct IssuanceBalanceStep {
    ledger: Arc<dyn LedgerGateway>,
    notifier: NotificationComposer,
    /// Holder id of the platform issuance account.
    issuer_holder_id: String,
}

impl IssuanceBalanceStep {
    pub fn new(
        ledger: Arc<dyn LedgerGateway>,
        notifier: NotificationComposer,
        issuer_holder_id: String,
    ) -> Self {
        Self {
            ledger,
            notifier,
            issuer_holder_id,
        }
    }
}

#[async_trait]
impl WorkflowStep for IssuanceBalanceStep {
    async fn process(&self, mut job: JobRecord) -> StepOutcome {
        let query = AccountQuery {
            holder_id: self.issuer_holder_id.clone(),
            currency: job.output.currency_id.clone(),
            category: Some(AccountCategory::Issuance),
        };
        // One execution issues exactly one token.
        let delta = BigDecimal::from(-1);

        match check_account_balance(self.ledger.as_ref(), &query, &delta).await {
            Ok(true) => {
                job.output.status = STATUS_SUFFICIENT.to_string();
                (job, None)
            }
            Ok(false) => {
                self.notifier
                    .finish(job, "issuance account balance is not sufficient")
                    .await
            }
            Err(e) => {
                self.notifier
                    .finish(job, &format!("failed to check issuance balance: {e}"))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MintflowConfig;
    use crate::error::{Result, StepError};
    use crate::models::LedgerAccount;
    use crate::workflow::gateways::{
        CallbackTransport, NewTransactionRecord, ParameterStore, TransactionGateway,
        TransactionPatch, TransactionRecord,
    };
    use crate::workflow::signer::Signer;
    use std::sync::Mutex;

    struct FixedLedger {
        accounts: Vec<LedgerAccount>,
    }

    #[async_trait]
    impl LedgerGateway for FixedLedger {
        async fn find_accounts(&self, _query: &AccountQuery) -> Result<Vec<LedgerAccount>> {
            Ok(self.accounts.clone())
        }
    }

    struct StubTransactions;

    #[async_trait]
    impl TransactionGateway for StubTransactions {
        async fn create(&self, _record: NewTransactionRecord) -> Result<String> {
            unreachable!()
        }
        async fn patch(&self, _id: &str, _patch: TransactionPatch) -> Result<()> {
            unreachable!()
        }
        async fn get(&self, _id: &str) -> Result<TransactionRecord> {
            Ok(TransactionRecord::default())
        }
    }

    struct TestParameters;

    #[async_trait]
    impl ParameterStore for TestParameters {
        async fn get(&self, _d: &str, _e: &str, _n: &str) -> Result<String> {
            Ok(format!(r#"{{"privateKey": "{}"}}"#, hex::encode([3u8; 32])))
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl CallbackTransport for RecordingTransport {
        async fn post_json(&self, _url: &str, body: &[u8]) -> Result<()> {
            self.sent.lock().unwrap().push(body.to_vec());
            Ok(())
        }
    }

    fn step(balance: &str, transport: Arc<RecordingTransport>) -> IssuanceBalanceStep {
        let ledger = Arc::new(FixedLedger {
            accounts: vec![LedgerAccount {
                id: "acc-issuance".to_string(),
                holder_id: "platform".to_string(),
                currency: "USD-TOKEN".to_string(),
                balance: balance.to_string(),
                locked_balance: "0".to_string(),
                category: Some(AccountCategory::Issuance),
            }],
        });
        let signer = Signer::new(Arc::new(TestParameters), transport, &MintflowConfig::default());
        let notifier = NotificationComposer::new(Arc::new(StubTransactions), signer);
        IssuanceBalanceStep::new(ledger, notifier, "platform".to_string())
    }

    fn job() -> JobRecord {
        let mut job = JobRecord::default();
        job.output.currency_id = "USD-TOKEN".to_string();
        job.input.callback_url = "https://example.test/callback".to_string();
        job
    }

    #[tokio::test]
    async fn test_sufficient_balance_marks_job_and_sends_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        // -(100 + 0 - 1) = -99 <= 0 => sufficient
        let step = step("100", transport.clone());

        let (result, error) = step.process(job()).await;
        assert!(error.is_none());
        assert!(result.output.is_sufficient());
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_balance_funnels_failure() {
        let transport = Arc::new(RecordingTransport::default());
        // -(-5 + 0 - 1) = 6 > 0 => insufficient
        let step = step("-5", transport.clone());

        let (result, error) = step.process(job()).await;
        assert!(matches!(error, Some(StepError::Composite(_))));
        assert!(result.output.extra_info.contains("not sufficient"));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }
}
