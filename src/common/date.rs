use chrono::{Local, NaiveDate};

use crate::common::error::LedgerError;

const ISO: &str = "%Y-%m-%d";
const DAY_FIRST: &str = "%d/%m/%Y";

/// Parses a calendar date written as `YYYY-MM-DD` or `dd/mm/yyyy`.
/// Impossible dates such as `31/02/2024` are rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate, LedgerError> {
    let t = s.trim();
    if t.is_empty() {
        return Err(LedgerError::validation("date is required"));
    }
    NaiveDate::parse_from_str(t, ISO)
        .or_else(|_| NaiveDate::parse_from_str(t, DAY_FIRST))
        .map_err(|_| LedgerError::validation(format!("invalid date: {t}")))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
