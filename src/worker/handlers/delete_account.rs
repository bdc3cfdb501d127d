use crate::{
    common::error::LedgerError,
    domain::{ids::AccountId, ledger::Ledger},
    worker::{Outcome, handlers::balance},
};

/// Number of transactions that would go with the account; the presentation
/// layer uses it to word the confirmation prompt.
pub fn dependent_transactions(ledger: &Ledger, id: &AccountId) -> usize {
    ledger.transactions_touching(id).count()
}

/// Deletes an account together with every transaction that names it.
///
/// When such transactions exist, `confirm_cascade` must be set or nothing
/// happens. Each removed transaction is reversed like a normal delete, so a
/// transfer counterpart that survives gets its balance back. Returns how many
/// transactions were removed.
pub fn handle(
    ledger: &mut Ledger,
    id: &AccountId,
    confirm_cascade: bool,
) -> Result<Outcome<usize>, LedgerError> {
    if ledger.account(id).is_none() {
        return Err(LedgerError::not_found("account", id));
    }

    let dependents: Vec<usize> = ledger
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, t)| t.touches(id))
        .map(|(i, _)| i)
        .collect();

    if !dependents.is_empty() && !confirm_cascade {
        return Err(LedgerError::CascadeNotConfirmed {
            account: id.to_string(),
            transactions: dependents.len(),
        });
    }

    let mut warnings = Vec::new();
    // Highest index first keeps the remaining indices valid.
    for index in dependents.iter().rev() {
        warnings.extend(balance::expunge(ledger, *index).warnings);
    }
    ledger.accounts.retain(|a| &a.id != id);

    Ok(Outcome {
        value: dependents.len(),
        warnings,
    })
}
