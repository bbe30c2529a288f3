//! # Validity Checks
//!
//! Stateless predicates over time and balances, shared across steps.
//!
//! A missing or unparseable timestamp is an internal-error condition, never a
//! verdict: an order with a broken expiry is left blocked for manual
//! operation rather than treated as still valid.

use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, StepError};
use crate::workflow::gateways::{AccountQuery, LedgerGateway};

/// Whether an order expiry timestamp (RFC3339) lies strictly in the past.
pub fn check_order_expiry(expire_at: &str) -> Result<bool> {
    if expire_at.is_empty() {
        return Err(StepError::Validation("nil order expiry time".to_string()));
    }
    check_timestamp(expire_at)
}

/// Whether an RFC3339 timestamp lies strictly before now.
pub fn check_timestamp(timestamp: &str) -> Result<bool> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|e| StepError::Validation(format!("invalid timestamp {timestamp}: {e}")))?;
    Ok(parsed.with_timezone(&Utc) < Utc::now())
}

/// Balance sufficiency for one holder and currency.
///
/// Fetches the holder's accounts (optionally narrowed by category); zero
/// matches is an error. Sufficiency holds iff -(balance + locked + delta) is
/// non-positive; locked funds count toward sufficiency.
pub async fn check_account_balance(
    ledger: &dyn LedgerGateway,
    query: &AccountQuery,
    delta: &BigDecimal,
) -> Result<bool> {
    let accounts = ledger.find_accounts(query).await?;
    let account = accounts.first().ok_or_else(|| {
        StepError::NotFound(format!("ledger accounts for {}", query.holder_id))
    })?;

    let balance = BigDecimal::from_str(&account.balance).map_err(|e| {
        StepError::Validation(format!(
            "invalid balance {} for account {}: {e}",
            account.balance, account.id
        ))
    })?;
    let locked = BigDecimal::from_str(&account.locked_balance).map_err(|e| {
        StepError::Validation(format!(
            "invalid locked balance {} for account {}: {e}",
            account.locked_balance, account.id
        ))
    })?;

    debug!(
        account = %account.id,
        balance = %balance,
        locked_balance = %locked,
        delta = %delta,
        "Checking account balance"
    );

    let shortfall = -(balance + locked + delta);
    Ok(shortfall <= BigDecimal::zero())
}
