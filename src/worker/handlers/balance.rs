//! The one place where transactions touch account balances.
//!
//! User-entered and synthetic transactions alike go through [`record`] when
//! they are created and [`expunge`] when they are removed, so balance and
//! history can never be observed out of step.

use chrono::NaiveDate;

use crate::{
    common::{
        config::LedgerConfig,
        error::{ConsistencyWarning, LedgerError},
        money::Money,
    },
    domain::{
        category::Category,
        ids::{AccountId, TransactionId},
        ledger::Ledger,
        transaction::{Transaction, TransactionKind},
    },
    worker::Outcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Apply,
    Reverse,
}

/// Signed change `tx` makes to `account`'s balance when applied.
pub fn effect_on(tx: &Transaction, account: &AccountId) -> Money {
    match &tx.kind {
        TransactionKind::Income { account_id } if account_id == account => tx.amount,
        TransactionKind::Expense { account_id, .. } if account_id == account => -tx.amount,
        TransactionKind::Transfer {
            account_id,
            to_account_id,
        } => {
            let mut delta = Money::zero();
            if account_id == account {
                delta -= tx.amount;
            }
            if to_account_id == account {
                delta += tx.amount;
            }
            delta
        }
        _ => Money::zero(),
    }
}

/// Signed change for each account side of `tx`, or `None` when the amount
/// has no negation in range.
fn sides(tx: &Transaction, direction: Direction) -> Option<Vec<(&AccountId, Money)>> {
    let amount = match direction {
        Direction::Apply => tx.amount,
        Direction::Reverse => tx.amount.checked_neg()?,
    };
    Some(match &tx.kind {
        TransactionKind::Income { account_id } => vec![(account_id, amount)],
        TransactionKind::Expense { account_id, .. } => vec![(account_id, amount.checked_neg()?)],
        TransactionKind::Transfer {
            account_id,
            to_account_id,
        } => vec![(account_id, amount.checked_neg()?), (to_account_id, amount)],
    })
}

/// Fails with a validation error when applying or reversing `tx` would push
/// a balance past what [`Money`] can hold. Missing accounts are not checked.
pub(crate) fn ensure_in_range(
    ledger: &Ledger,
    tx: &Transaction,
    direction: Direction,
) -> Result<(), LedgerError> {
    let out_of_range = || LedgerError::validation("amount out of range");
    for (account, delta) in sides(tx, direction).ok_or_else(out_of_range)? {
        if let Some(acc) = ledger.account(account) {
            acc.balance.checked_add(delta).ok_or_else(out_of_range)?;
        }
    }
    Ok(())
}

/// Applies or reverses the effect of `tx`. A side whose account is missing,
/// or whose balance would leave the representable range, is skipped and
/// reported instead of failing the whole operation.
pub(crate) fn apply_effect(
    ledger: &mut Ledger,
    tx: &Transaction,
    direction: Direction,
) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();
    let Some(sides) = sides(tx, direction) else {
        tracing::error!(
            transaction = %tx.id,
            amount = %tx.amount,
            "amount cannot be reversed"
        );
        warnings.push(ConsistencyWarning {
            transaction: tx.id.to_string(),
            account: tx.account_id().to_string(),
        });
        return warnings;
    };
    for (account, delta) in sides {
        adjust(ledger, &tx.id, account, delta, &mut warnings);
    }
    warnings
}

fn adjust(
    ledger: &mut Ledger,
    tx: &TransactionId,
    account: &AccountId,
    delta: Money,
    warnings: &mut Vec<ConsistencyWarning>,
) {
    let applied = match ledger.account_mut(account) {
        Some(acc) => match acc.balance.checked_add(delta) {
            Some(balance) => {
                acc.balance = balance;
                true
            }
            None => {
                tracing::error!(
                    transaction = %tx,
                    account = %account,
                    "balance side skipped: out of range"
                );
                false
            }
        },
        None => {
            tracing::warn!(
                transaction = %tx,
                account = %account,
                "balance side skipped: account missing"
            );
            false
        }
    };
    if !applied {
        warnings.push(ConsistencyWarning {
            transaction: tx.to_string(),
            account: account.to_string(),
        });
    }
}

/// Applies `tx` and appends it to the history.
pub(crate) fn record(ledger: &mut Ledger, tx: Transaction) -> Outcome<Transaction> {
    let warnings = apply_effect(ledger, &tx, Direction::Apply);
    ledger.transactions.push(tx.clone());
    Outcome {
        value: tx,
        warnings,
    }
}

/// Reverses the transaction at `index` using its own recorded fields, then
/// drops it from the history.
pub(crate) fn expunge(ledger: &mut Ledger, index: usize) -> Outcome<Transaction> {
    let tx = ledger.transactions[index].clone();
    let warnings = apply_effect(ledger, &tx, Direction::Reverse);
    ledger.transactions.remove(index);
    Outcome {
        value: tx,
        warnings,
    }
}

/// Builds the engine-authored entry that explains a balance change of
/// `delta`: income when positive, expense in the default bucket otherwise.
/// `delta` must have an absolute value in range.
pub(crate) fn synthetic(
    account: &AccountId,
    delta: Money,
    description: &str,
    date: NaiveDate,
    config: &LedgerConfig,
) -> Transaction {
    let kind = if delta.is_positive() {
        TransactionKind::Income {
            account_id: account.clone(),
        }
    } else {
        TransactionKind::Expense {
            account_id: account.clone(),
            category: Category::new(&config.default_category),
        }
    };
    Transaction {
        id: TransactionId::generate(),
        description: description.to_string(),
        amount: delta.abs(),
        date,
        kind,
    }
}
