use std::io::Write;

use crate::domain::{
    account::Account,
    transaction::{Transaction, TransactionKind},
};

#[derive(serde::Serialize)]
/// Headers written (in this order): `id,name,balance`.
struct AccountRow<'a> {
    id: &'a str,
    name: &'a str,
    balance: String,
}

#[derive(serde::Serialize)]
struct TransactionRow<'a> {
    id: &'a str,
    date: String,
    #[serde(rename = "type")]
    tx_type: &'static str,
    description: &'a str,
    amount: String,
    account_id: &'a str,
    to_account_id: Option<&'a str>,
    category: Option<&'a str>,
}

/// Writes accounts to a CSV writer in the order given.
///
/// Balances are formatted with exactly 2 decimal places.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use pocket_ledger::io::writer::write_accounts;
/// use pocket_ledger::domain::account::Account;
///
/// let accounts = vec![Account::new("Wallet")];
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &accounts).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("id,name,balance\n"));
/// assert!(s.contains(",Wallet,0.00"));
/// ```
pub fn write_accounts<W: Write>(writer: W, accounts: &[Account]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for acc in accounts {
        wtr.serialize(AccountRow {
            id: acc.id.as_str(),
            name: &acc.name,
            balance: acc.balance.to_string_2dp(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes transactions in the order given, typically the output of
/// [`crate::query::sort_transactions`]. The header matches what
/// [`crate::io::reader::read_transactions`] accepts.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[&Transaction],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for tx in transactions {
        wtr.serialize(TransactionRow {
            id: tx.id.as_str(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            tx_type: tx.tx_type().as_str(),
            description: &tx.description,
            amount: tx.amount.to_string_2dp(),
            account_id: tx.account_id().as_str(),
            to_account_id: tx.to_account_id().map(|id| id.as_str()),
            category: match &tx.kind {
                TransactionKind::Expense { category, .. } => Some(category.as_str()),
                _ => None,
            },
        })?;
    }

    wtr.flush()?;
    Ok(())
}
