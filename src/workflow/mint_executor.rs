//! # Mint Executor
//!
//! Dispatches the opaque mint capability by contract protocol. An unsupported
//! protocol is terminal and non-retryable: it is reported as a validation
//! failure naming the protocol, and the mint client is never called.

use std::sync::Arc;

use tracing::info;

use crate::error::{Result, StepError};
use crate::models::{OnChainTransaction, OnChainTxStatus, TokenContract};
use crate::workflow::gateways::{ContractInfo, MintClient};

/// Every mint issues exactly one token.
pub const MINT_AMOUNT: &str = "1";

/// Negative gas limit means unbounded gas.
pub const UNBOUNDED_GAS: i64 = -1;

pub struct MintExecutor {
    client: Arc<dyn MintClient>,
}

impl MintExecutor {
    pub fn new(client: Arc<dyn MintClient>) -> Self {
        Self { client }
    }

    /// Mint one token of `token_id` against the contract.
    pub async fn mint(&self, contract: &TokenContract, token_id: &str) -> Result<OnChainTransaction> {
        match contract.protocol {
            crate::models::ContractProtocol::Erc1155 => {
                let receipt = self
                    .client
                    .mint(&ContractInfo::from(contract), token_id, MINT_AMOUNT, UNBOUNDED_GAS)
                    .await?;
                info!(
                    contract = %contract.address,
                    token_id = %token_id,
                    tx_hash = %receipt.tx_hash,
                    nonce = receipt.nonce,
                    "Submitted mint"
                );
                Ok(OnChainTransaction {
                    tx_hash: receipt.tx_hash,
                    contract_id: contract.id,
                    token_id: token_id.to_string(),
                    nonce: receipt.nonce,
                    gas_price: receipt.gas_price.to_string(),
                    status: OnChainTxStatus::Pending,
                })
            }
            unsupported => Err(StepError::Validation(format!(
                "unsupported smart contract protocol {unsupported}"
            ))),
        }
    }
}
