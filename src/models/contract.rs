//! Token contract descriptor. Read-only to this core; contracts are managed
//! by an upstream registry and looked up here by id or by currency.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smart contract protocol of a mint target.
///
/// Closed world: only protocols the pipeline has mint support for are
/// dispatched; everything else is rejected at mint time as a terminal,
/// non-retryable validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractProtocol {
    #[serde(rename = "ERC1155")]
    Erc1155,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC20")]
    Erc20,
}

impl fmt::Display for ContractProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractProtocol::Erc1155 => write!(f, "ERC1155"),
            ContractProtocol::Erc721 => write!(f, "ERC721"),
            ContractProtocol::Erc20 => write!(f, "ERC20"),
        }
    }
}

/// A deployed token contract the step can mint against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContract {
    pub id: Uuid,
    pub protocol: ContractProtocol,
    pub address: String,
    pub name: String,
    pub node_uri: String,
    pub currency_id: Uuid,
    pub chain: String,
    pub chain_network: String,
}
