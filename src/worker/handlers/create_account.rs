use chrono::NaiveDate;

use crate::{
    common::{config::LedgerConfig, error::LedgerError, money::Money},
    domain::{account::Account, ledger::Ledger},
    worker::{Outcome, handlers::balance},
};

/// Opens a new account.
///
/// A positive `initial_balance` is not written into the balance directly: the
/// account starts at zero and an "initial deposit" income dated `today` brings
/// it up, so the amount shows in the history. A negative starting balance has
/// no transaction type to express it and is kept as the opening balance.
pub fn handle(
    ledger: &mut Ledger,
    name: &str,
    initial_balance: Money,
    today: NaiveDate,
    config: &LedgerConfig,
) -> Result<Outcome<Account>, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("account name is required"));
    }

    let account = if initial_balance.is_negative() {
        Account::with_opening_balance(name, initial_balance)
    } else {
        Account::new(name)
    };
    let id = account.id.clone();
    ledger.accounts.push(account);

    let mut warnings = Vec::new();
    if initial_balance.is_positive() {
        let deposit = balance::synthetic(
            &id,
            initial_balance,
            &config.initial_deposit_label,
            today,
            config,
        );
        warnings = balance::record(ledger, deposit).warnings;
    }

    let account = ledger
        .account(&id)
        .cloned()
        .ok_or_else(|| LedgerError::not_found("account", &id))?;
    Ok(Outcome {
        value: account,
        warnings,
    })
}
