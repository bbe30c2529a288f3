//! # Mint Step
//!
//! The step that turns an order into a minted on-chain token: resolve the
//! target contract, dispatch the mint, persist the downstream transaction
//! record, and report the outcome through the notification funnel.
//!
//! Every failure branch takes the identical path into the funnel, so each
//! terminal outcome of the step produces exactly one signed callback. The
//! resolved contract id and the assigned transaction id are memoized back
//! into the job input; a re-invoked step skips the currency search and
//! patches instead of creating. The mint side effect itself is not
//! deduplicated: a retry after "minted but record-write failed" mints again.
//!
//! The success marker on the job output is owned by the upstream balance
//! gate, not written here; a job arriving without it still gets its callback
//! reported as failed by the funnel.

use async_trait::async_trait;

use crate::logging::log_step_operation;
use crate::models::JobRecord;
use crate::workflow::contract_resolver::ContractResolver;
use crate::workflow::mint_executor::MintExecutor;
use crate::workflow::notification::NotificationComposer;
use crate::workflow::recorder::TransactionRecorder;
use crate::workflow::types::{StepOutcome, WorkflowStep};

pub struct MintStep {
    resolver: ContractResolver,
    executor: MintExecutor,
    recorder: TransactionRecorder,
    notifier: NotificationComposer,
}

impl MintStep {
    pub fn new(
        resolver: ContractResolver,
        executor: MintExecutor,
        recorder: TransactionRecorder,
        notifier: NotificationComposer,
    ) -> Self {
        Self {
            resolver,
            executor,
            recorder,
            notifier,
        }
    }

    /// Entry point for raw orchestrator payloads. A decode failure is
    /// funnelled with a parse message; no mint is attempted.
    pub async fn process_raw(&self, raw: serde_json::Value) -> StepOutcome {
        match JobRecord::from_value(raw) {
            Ok(job) => self.process(job).await,
            Err(parse_err) => {
                self.notifier
                    .finish(JobRecord::default(), &parse_err.to_string())
                    .await
            }
        }
    }
}

#[async_trait]
impl WorkflowStep for MintStep {
    async fn process(&self, mut job: JobRecord) -> StepOutcome {
        log_step_operation(
            "Mint",
            Some(&job.input.order_id),
            Some(&job.input.payment_id),
            "started",
            None,
        );

        let resolved = match self
            .resolver
            .resolve(&job.input.contract_id, &job.output.currency_id)
            .await
        {
            Ok(resolved) => resolved,
            Err(e) => {
                return self
                    .notifier
                    .finish(job, &format!("cannot resolve token contract: {e}"))
                    .await;
            }
        };
        if !resolved.already_resolved {
            job.input.contract_id = resolved.contract.id.to_string();
        }
        let contract = resolved.contract;

        let tx = match self.executor.mint(&contract, &job.input.token_id).await {
            Ok(tx) => tx,
            Err(e) => {
                return self
                    .notifier
                    .finish(job, &format!("failed to mint token: {e}"))
                    .await;
            }
        };

        if !tx.is_created() {
            return self
                .notifier
                .finish(job, "on-chain transaction is not created: empty transaction hash")
                .await;
        }

        let recorded = match self.recorder.record(&job, &contract, &tx).await {
            Ok(recorded) => recorded,
            Err(e) => {
                return self
                    .notifier
                    .finish(job, &format!("failed to record transaction: {e}"))
                    .await;
            }
        };
        if recorded.created {
            job.input.transaction_id = recorded.transaction_id;
        }

        job.output.tx_hash = tx.tx_hash.clone();
        job.output.currency_id = contract.currency_id.to_string();
        job.output.time_stamp.clear();

        log_step_operation(
            "Mint",
            Some(&job.input.order_id),
            Some(&job.input.payment_id),
            "minted",
            Some(&job.output.tx_hash),
        );
        self.notifier.finish(job, "").await
    }
}
