//! Ledger account shape consumed by the balance sufficiency check.
//!
//! Balances arrive as decimal strings from the ledger service and are parsed
//! with arbitrary precision at the point of use; an unparseable balance is a
//! validation failure, never silently zero.

use serde::{Deserialize, Serialize};

/// Ledger account category used to narrow account queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    Issuance,
    Treasury,
    User,
}

/// A holder's account for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub id: String,
    pub holder_id: String,
    pub currency: String,
    /// Settled balance, decimal string.
    pub balance: String,
    /// Funds reserved but not settled; counted toward sufficiency.
    pub locked_balance: String,
    pub category: Option<AccountCategory>,
}
