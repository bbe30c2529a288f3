//! # Collaborator Gateways
//!
//! Trait seams for every external system the step core calls: contract
//! lookup, the opaque mint capability, the downstream transaction record
//! service, the parameter store holding key material, outbound callback
//! transport, and the ledger.
//!
//! All collaborators are constructor-injected and owned by the composition
//! root; steps hold them behind `Arc<dyn ...>`. Engine internals (database,
//! RPC, HTTP stacks behind these traits) are out of scope for this crate;
//! the single production implementation shipped here is the reqwest-backed
//! [`HttpCallbackTransport`].

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StepError};
use crate::models::{AccountCategory, LedgerAccount, TokenContract};

/// Criteria for a single-contract lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCriteria {
    pub currency_id: String,
}

/// Locates mint targets.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Find exactly one contract matching the criteria. Zero or more than
    /// one match is an error, not a silent pick.
    async fn find_one(&self, criteria: &ContractCriteria) -> Result<TokenContract>;

    /// Find a contract by its identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<TokenContract>;
}

/// Connection details handed to the mint capability.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInfo {
    pub address: String,
    pub name: String,
    pub node_uri: String,
}

impl From<&TokenContract> for ContractInfo {
    fn from(contract: &TokenContract) -> Self {
        Self {
            address: contract.address.clone(),
            name: contract.name.clone(),
            node_uri: contract.node_uri.clone(),
        }
    }
}

/// What the chain reported for a submitted mint.
#[derive(Debug, Clone, PartialEq)]
pub struct MintReceipt {
    pub tx_hash: String,
    pub nonce: u64,
    pub gas_price: BigDecimal,
}

/// Opaque blockchain mint capability.
#[async_trait]
pub trait MintClient: Send + Sync {
    /// Submit a mint of `amount` tokens of `token_id` against the contract.
    /// A negative `gas_limit` means unbounded gas.
    async fn mint(
        &self,
        contract: &ContractInfo,
        token_id: &str,
        amount: &str,
        gas_limit: i64,
    ) -> Result<MintReceipt>;
}

/// Fields for creating a downstream transaction record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTransactionRecord {
    pub tx_hash: String,
    pub nonce: String,
    pub gas_fee: String,
    pub token_id: String,
    pub amount: String,
    pub contract_id: String,
    pub to_address: String,
    pub payment_id: String,
    pub tx_type: String,
    pub user_id: String,
    pub chain: String,
    pub chain_network: String,
}

/// Fields patched onto an existing transaction record on replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionPatch {
    pub tx_hash: String,
    pub nonce: String,
    pub gas_fee: String,
    pub user_id: String,
    pub payment_id: String,
    pub chain: String,
    pub chain_network: String,
    pub to_address: String,
}

/// The downstream record as read back when composing a callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRecord {
    pub id: String,
    pub tx_hash: String,
    pub gas_fee: String,
    pub chain: String,
    pub chain_network: String,
}

/// Create-or-update access to the downstream transaction store.
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Create a record and return its assigned id.
    async fn create(&self, record: NewTransactionRecord) -> Result<String>;

    /// Patch an existing record.
    async fn patch(&self, id: &str, patch: TransactionPatch) -> Result<()>;

    /// Fetch a record by id.
    async fn get(&self, id: &str) -> Result<TransactionRecord>;
}

/// Per-environment, per-domain parameter store for key material.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get(&self, domain: &str, environment: &str, name: &str) -> Result<String>;
}

/// Outbound delivery of one signed callback body.
#[async_trait]
pub trait CallbackTransport: Send + Sync {
    /// One synchronous POST with a JSON content type. No internal retry;
    /// at-least-once delivery relies on the orchestrator re-invoking the step.
    async fn post_json(&self, url: &str, body: &[u8]) -> Result<()>;
}

/// Query for the accounts of one holder in one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountQuery {
    pub holder_id: String,
    pub currency: String,
    pub category: Option<AccountCategory>,
}

/// Read access to ledger accounts.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn find_accounts(&self, query: &AccountQuery) -> Result<Vec<LedgerAccount>>;
}

/// Production callback transport backed by reqwest.
pub struct HttpCallbackTransport {
    client: reqwest::Client,
}

impl HttpCallbackTransport {
    pub fn new(timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| StepError::Configuration(format!("cannot build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CallbackTransport for HttpCallbackTransport {
    async fn post_json(&self, url: &str, body: &[u8]) -> Result<()> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| StepError::Upstream(format!("callback POST to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StepError::Upstream(format!(
                "callback POST to {url} returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
