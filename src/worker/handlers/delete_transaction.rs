use crate::{
    common::error::LedgerError,
    domain::{ids::TransactionId, ledger::Ledger, transaction::Transaction},
    worker::{
        Outcome,
        handlers::balance::{self, Direction},
    },
};

pub fn handle(
    ledger: &mut Ledger,
    id: &TransactionId,
) -> Result<Outcome<Transaction>, LedgerError> {
    let index = ledger
        .transaction_index(id)
        .ok_or_else(|| LedgerError::not_found("transaction", id))?;
    balance::ensure_in_range(ledger, &ledger.transactions[index], Direction::Reverse)?;
    Ok(balance::expunge(ledger, index))
}
