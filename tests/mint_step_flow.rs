//! End-to-end tests of the mint step against recording mock collaborators:
//! resolution and memoization, the guaranteed-notification funnel, and the
//! replay path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use mintflow_core::config::MintflowConfig;
use mintflow_core::error::{Result, StepError};
use mintflow_core::models::{
    ContractProtocol, JobRecord, NotificationPayload, NotificationStatus, TokenContract,
    STATUS_SUFFICIENT,
};
use mintflow_core::workflow::{
    CallbackTransport, ContractCriteria, ContractInfo, ContractRepository, ContractResolver,
    MintClient, MintExecutor, MintReceipt, MintStep, NewTransactionRecord,
    NotificationComposer, ParameterStore, Signer, TransactionGateway, TransactionPatch,
    TransactionRecord, TransactionRecorder, WorkflowStep,
};

const TEST_SEED: [u8; 32] = [5u8; 32];

struct MockContracts {
    contract: TokenContract,
    find_one_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
}

impl MockContracts {
    fn new(protocol: ContractProtocol) -> Self {
        Self {
            contract: TokenContract {
                id: Uuid::new_v4(),
                protocol,
                address: "0x1234".to_string(),
                name: "Editions".to_string(),
                node_uri: "https://node.example.test".to_string(),
                currency_id: Uuid::new_v4(),
                chain: "ethereum".to_string(),
                chain_network: "mainnet".to_string(),
            },
            find_one_calls: AtomicUsize::new(0),
            find_by_id_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContractRepository for MockContracts {
    async fn find_one(&self, criteria: &ContractCriteria) -> Result<TokenContract> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        if criteria.currency_id == "USD-TOKEN" {
            Ok(self.contract.clone())
        } else {
            Err(StepError::NotFound(format!(
                "token contract for currency {}",
                criteria.currency_id
            )))
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<TokenContract> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        if id == self.contract.id {
            Ok(self.contract.clone())
        } else {
            Err(StepError::NotFound(format!("token contract {id}")))
        }
    }
}

struct MockMint {
    tx_hash: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockMint {
    fn succeeding() -> Self {
        Self {
            tx_hash: "0xabc".to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_hash(tx_hash: &str) -> Self {
        Self {
            tx_hash: tx_hash.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            tx_hash: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MintClient for MockMint {
    async fn mint(
        &self,
        _contract: &ContractInfo,
        _token_id: &str,
        _amount: &str,
        _gas_limit: i64,
    ) -> Result<MintReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StepError::Upstream("node rejected transaction".to_string()));
        }
        Ok(MintReceipt {
            tx_hash: self.tx_hash.clone(),
            nonce: 7,
            gas_price: BigDecimal::from(100),
        })
    }
}

#[derive(Default)]
struct MockTransactions {
    fail_get: bool,
    created: Mutex<Vec<NewTransactionRecord>>,
    patched: Mutex<Vec<(String, TransactionPatch)>>,
    get_calls: AtomicUsize,
}

#[async_trait]
impl TransactionGateway for MockTransactions {
    async fn create(&self, record: NewTransactionRecord) -> Result<String> {
        self.created.lock().unwrap().push(record);
        Ok("txn-assigned-1".to_string())
    }

    async fn patch(&self, id: &str, patch: TransactionPatch) -> Result<()> {
        self.patched.lock().unwrap().push((id.to_string(), patch));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<TransactionRecord> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(StepError::Upstream(
                "transaction service unavailable".to_string(),
            ));
        }
        Ok(TransactionRecord {
            id: id.to_string(),
            tx_hash: "0xabc".to_string(),
            gas_fee: "100".to_string(),
            chain: "ethereum".to_string(),
            chain_network: "mainnet".to_string(),
        })
    }
}

struct TestParameters;

#[async_trait]
impl ParameterStore for TestParameters {
    async fn get(&self, _domain: &str, _environment: &str, _name: &str) -> Result<String> {
        Ok(format!(r#"{{"privateKey": "{}"}}"#, hex::encode(TEST_SEED)))
    }
}

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingTransport {
    fn single_payload(&self) -> NotificationPayload {
        let sent = self.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "exactly one callback expected");
        serde_json::from_slice(&sent[0].1).unwrap()
    }
}

#[async_trait]
impl CallbackTransport for RecordingTransport {
    async fn post_json(&self, url: &str, body: &[u8]) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((url.to_string(), body.to_vec()));
        Ok(())
    }
}

struct Harness {
    contracts: Arc<MockContracts>,
    mint: Arc<MockMint>,
    transactions: Arc<MockTransactions>,
    transport: Arc<RecordingTransport>,
    step: MintStep,
}

fn harness(contracts: MockContracts, mint: MockMint, transactions: MockTransactions) -> Harness {
    let contracts = Arc::new(contracts);
    let mint = Arc::new(mint);
    let transactions = Arc::new(transactions);
    let transport = Arc::new(RecordingTransport::default());

    let signer = Signer::new(
        Arc::new(TestParameters),
        transport.clone(),
        &MintflowConfig::default(),
    );
    let step = MintStep::new(
        ContractResolver::new(contracts.clone()),
        MintExecutor::new(mint.clone()),
        TransactionRecorder::new(transactions.clone()),
        NotificationComposer::new(transactions.clone(), signer),
    );

    Harness {
        contracts,
        mint,
        transactions,
        transport,
        step,
    }
}

fn mint_job() -> JobRecord {
    let mut job = JobRecord::default();
    job.input.order_id = "ord-1".to_string();
    job.input.payment_id = "pay-1".to_string();
    job.input.token_id = "42".to_string();
    job.input.transaction_type = "Mint".to_string();
    job.input.callback_url = "https://example.test/callback".to_string();
    job.input.external_transaction_id = "ext-1".to_string();
    job.output.currency_id = "USD-TOKEN".to_string();
    job.output.status = STATUS_SUFFICIENT.to_string();
    job.output.user_id = "user-1".to_string();
    job.output.time_stamp = "2026-01-01T00:00:00Z".to_string();
    job
}

#[tokio::test]
async fn test_happy_path_resolves_mints_records_and_notifies_once() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::succeeding(),
        MockTransactions::default(),
    );

    let (job, error) = h.step.process(mint_job()).await;
    assert!(error.is_none(), "unexpected error: {error:?}");

    // Output fields set from the mint result and resolved contract.
    assert_eq!(job.output.status, STATUS_SUFFICIENT);
    assert_eq!(job.output.tx_hash, "0xabc");
    assert_eq!(job.output.currency_id, h.contracts.contract.currency_id.to_string());
    assert_eq!(job.output.time_stamp, "");

    // Resolved identifiers memoized into the input for replay.
    assert_eq!(job.input.contract_id, h.contracts.contract.id.to_string());
    assert_eq!(job.input.transaction_id, "txn-assigned-1");
    assert_eq!(h.contracts.find_one_calls.load(Ordering::SeqCst), 1);

    // Record created with the mint details.
    let created = h.transactions.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].tx_hash, "0xabc");
    assert_eq!(created[0].nonce, "7");
    assert_eq!(created[0].gas_fee, "100");
    drop(created);

    // Exactly one succeeded notification; user id blanked for pure mints.
    let payload = h.transport.single_payload();
    assert_eq!(payload.status, NotificationStatus::Succeeded);
    assert_eq!(payload.tx_hash, "0xabc");
    assert_eq!(payload.user_id, "");
    assert!(!payload.signature.is_empty());
}

#[tokio::test]
async fn test_success_without_sufficient_marker_reports_failed_callback() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::succeeding(),
        MockTransactions::default(),
    );
    let mut job = mint_job();
    job.output.status = String::new();

    let (job, error) = h.step.process(job).await;
    assert!(error.is_none());

    // The mint and record write still happened.
    assert_eq!(job.output.tx_hash, "0xabc");
    assert_eq!(h.transactions.created.lock().unwrap().len(), 1);

    // The success marker is owned by the upstream balance gate; the step
    // never writes it, so the funnel reports the unmarked job as failed.
    assert!(!job.output.is_sufficient());
    assert!(job.output.extra_info.contains(", not sufficient"));
    assert_eq!(h.transport.single_payload().status, NotificationStatus::Failed);
}

#[tokio::test]
async fn test_replay_skips_resolution_and_patches_record() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::succeeding(),
        MockTransactions::default(),
    );
    let mut job = mint_job();
    job.input.contract_id = h.contracts.contract.id.to_string();
    job.input.transaction_id = "txn-existing".to_string();

    let (job, error) = h.step.process(job).await;
    assert!(error.is_none());

    // No currency search, no create; direct lookup and patch instead.
    assert_eq!(h.contracts.find_one_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.contracts.find_by_id_calls.load(Ordering::SeqCst), 1);
    assert!(h.transactions.created.lock().unwrap().is_empty());
    assert_eq!(h.transactions.patched.lock().unwrap().len(), 1);
    assert_eq!(job.input.transaction_id, "txn-existing");
}

#[tokio::test]
async fn test_empty_mint_hash_is_failure_with_one_notification() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::with_hash(""),
        MockTransactions::default(),
    );

    let (job, error) = h.step.process(mint_job()).await;
    let error = error.unwrap();
    assert!(error.to_string().contains("not created"));
    assert!(job.output.extra_info.contains("empty transaction hash"));

    // No record write happened; still exactly one (failed) notification.
    assert!(h.transactions.created.lock().unwrap().is_empty());
    assert_eq!(h.transport.single_payload().status, NotificationStatus::Failed);
}

#[tokio::test]
async fn test_unsupported_protocol_never_calls_mint_client() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc721),
        MockMint::succeeding(),
        MockTransactions::default(),
    );

    let (_, error) = h.step.process(mint_job()).await;
    let error = error.unwrap();
    assert!(error.to_string().contains("ERC721"));
    assert_eq!(h.mint.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.transport.single_payload().status, NotificationStatus::Failed);
}

#[tokio::test]
async fn test_mint_failure_plus_record_fetch_failure_merges_both_causes() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::failing(),
        MockTransactions {
            fail_get: true,
            ..Default::default()
        },
    );

    let (_, error) = h.step.process(mint_job()).await;
    let text = error.unwrap().to_string();
    assert!(text.contains("node rejected transaction"));
    assert!(text.contains("transaction service unavailable"));

    // Minimal best-known-state payload still went out, exactly once.
    let payload = h.transport.single_payload();
    assert_eq!(payload.status, NotificationStatus::Failed);
    assert_eq!(payload.payment_id, "pay-1");
    assert_eq!(payload.token_id, "42");
    assert_eq!(payload.external_transaction_id, "ext-1");
    assert_eq!(payload.tx_hash, "");
}

#[tokio::test]
async fn test_unparseable_payload_funnels_without_minting() {
    let h = harness(
        MockContracts::new(ContractProtocol::Erc1155),
        MockMint::succeeding(),
        MockTransactions::default(),
    );

    let raw = serde_json::json!({"input": {"attributes": 7}});
    let (job, error) = h.step.process_raw(raw).await;
    let error = error.unwrap();
    assert!(error.to_string().contains("parse"));
    assert!(job.output.extra_info.contains("cannot parse job payload"));
    assert_eq!(h.mint.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.transport.single_payload().status, NotificationStatus::Failed);
}
