use crate::{
    common::{date::parse_date, event::NewTransaction, money::Money},
    domain::{category::Category, ids::AccountId, transaction::TxType},
};
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row matching the transaction export headers. `id` is accepted
/// so an export can be fed straight back in, but imported rows get fresh ids.
struct CsvRow {
    #[serde(default, rename = "id")]
    _id: Option<String>,
    date: String,
    #[serde(rename = "type")]
    tx_type: String,
    #[serde(default)]
    description: String,
    amount: Option<String>,
    account_id: String,
    to_account_id: Option<String>,
    category: Option<String>,
}

/// Reads transaction rows from a CSV reader into unvalidated
/// [`NewTransaction`]s. The engine still checks accounts and amounts when the
/// rows are applied.
///
/// Supported headers: `id,date,type,description,amount,account_id,to_account_id,category`
/// (`id` optional). Dates are `YYYY-MM-DD` or `DD/MM/YYYY`; errors carry the
/// 1-based data row number.
///
/// # Examples
///
/// ```
/// use pocket_ledger::io::reader::read_transactions;
/// use pocket_ledger::domain::transaction::TxType;
/// use csv::ReaderBuilder;
///
/// let data = "date,type,description,amount,account_id,to_account_id,category\n\
/// 2024-03-01,income,Salary,2500,wallet,,\n\
/// 02/03/2024,expense,Coffee,3.50,wallet,,food\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let rows: Vec<_> = read_transactions(&mut rdr).collect();
///
/// assert_eq!(rows[0].as_ref().unwrap().tx_type, TxType::Income);
/// assert_eq!(rows[1].as_ref().unwrap().category.as_ref().unwrap().as_str(), "food");
/// ```
pub fn read_transactions<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<NewTransaction, String>> + '_ {
    rdr.deserialize::<CsvRow>().enumerate().map(|(i, res)| {
        let row_no = i + 1;
        let row = res.map_err(|e| format!("row {row_no}: {e}"))?;

        let tx_type =
            TxType::from_str(&row.tx_type).map_err(|e| format!("row {row_no}: {e}"))?;
        let amount = row
            .amount
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| format!("row {row_no}: {tx_type} missing amount"))?;
        let amount =
            Money::from_str(amount.trim()).map_err(|e| format!("row {row_no}: {e}"))?;
        let date = parse_date(&row.date).map_err(|e| format!("row {row_no}: {e}"))?;
        let account_id = AccountId::from_str(&row.account_id)
            .map_err(|_| format!("row {row_no}: account_id is required"))?;
        let to_account_id = non_blank(row.to_account_id).map(AccountId::from);
        if tx_type == TxType::Transfer && to_account_id.is_none() {
            return Err(format!("row {row_no}: transfer missing to_account_id"));
        }

        Ok(NewTransaction {
            tx_type,
            description: row.description.trim().to_string(),
            amount,
            date,
            account_id,
            to_account_id,
            category: non_blank(row.category).map(|c| Category::new(&c)),
        })
    })
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
