use chrono::NaiveDate;

use crate::{
    common::{config::LedgerConfig, error::LedgerError, money::Money},
    domain::{account::Account, ids::AccountId, ledger::Ledger},
    worker::{Outcome, handlers::balance},
};

/// Renames an account and moves its balance to `new_balance`.
///
/// The balance is never overwritten: the difference is recorded as a
/// "balance adjustment" income (raise) or expense (cut) dated `today`.
pub fn handle(
    ledger: &mut Ledger,
    id: &AccountId,
    name: &str,
    new_balance: Money,
    today: NaiveDate,
    config: &LedgerConfig,
) -> Result<Outcome<Account>, LedgerError> {
    let current = ledger
        .account(id)
        .ok_or_else(|| LedgerError::not_found("account", id))?
        .balance;
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("account name is required"));
    }

    let delta = new_balance
        .checked_sub(current)
        .filter(|d| d.checked_abs().is_some())
        .ok_or_else(|| LedgerError::validation("amount out of range"))?;
    let mut warnings = Vec::new();
    if !delta.is_zero() {
        let adjustment =
            balance::synthetic(id, delta, &config.balance_adjustment_label, today, config);
        warnings = balance::record(ledger, adjustment).warnings;
    }

    let account = ledger
        .account_mut(id)
        .ok_or_else(|| LedgerError::not_found("account", id))?;
    account.name = name.to_string();

    Ok(Outcome {
        value: account.clone(),
        warnings,
    })
}
