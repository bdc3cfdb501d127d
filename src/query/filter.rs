use chrono::{Datelike, NaiveDate};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::domain::{
    category::Category,
    ids::AccountId,
    ledger::Ledger,
    transaction::{Transaction, TxType},
};

/// Date window of a transaction view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    All,
    Month {
        year: i32,
        month: u32,
    },
    /// Both ends inclusive.
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl Period {
    pub fn current(today: NaiveDate) -> Self {
        Period::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn previous(today: NaiveDate) -> Self {
        if today.month() == 1 {
            Period::Month {
                year: today.year() - 1,
                month: 12,
            }
        } else {
            Period::Month {
                year: today.year(),
                month: today.month() - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::All => true,
            Period::Month { year, month } => date.year() == year && date.month() == month,
            Period::Range { start, end } => start <= date && date <= end,
        }
    }
}

/// Active filters of a transaction view. The default lets everything through;
/// every field that is set narrows the result further.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Matches source or destination.
    pub account: Option<AccountId>,
    pub period: Period,
    /// Substring of the description, ignoring case and accents.
    pub search: Option<String>,
    /// Empty means every type.
    pub types: Vec<TxType>,
    pub category: Option<Category>,
}

/// Lowercases and strips combining marks, so "Café" and "cafe" compare equal.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn filter_transactions<'a>(
    ledger: &'a Ledger,
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(fold);

    ledger
        .transactions()
        .iter()
        .filter(|t| filter.account.as_ref().is_none_or(|a| t.touches(a)))
        .filter(|t| filter.period.contains(t.date))
        .filter(|t| {
            needle
                .as_deref()
                .is_none_or(|n| fold(&t.description).contains(n))
        })
        .filter(|t| filter.types.is_empty() || filter.types.contains(&t.tx_type()))
        .filter(|t| {
            filter
                .category
                .as_ref()
                .is_none_or(|c| t.category() == c.as_str())
        })
        .collect()
}
