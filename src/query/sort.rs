use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

/// Total order for `key`. Ties fall back to date and then id, in the same
/// direction as the primary key, so "newest first" puts the most recently
/// created entry of a day on top.
fn compare(key: SortKey, a: &Transaction, b: &Transaction) -> Ordering {
    let by_date = a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id));
    match key {
        SortKey::DateAsc => by_date,
        SortKey::DateDesc => by_date.reverse(),
        SortKey::AmountAsc => a.amount.cmp(&b.amount).then(by_date),
        SortKey::AmountDesc => a.amount.cmp(&b.amount).then(by_date).reverse(),
    }
}

pub fn sort_transactions<'a>(list: &[&'a Transaction], key: SortKey) -> Vec<&'a Transaction> {
    let mut sorted = list.to_vec();
    sorted.sort_by(|a, b| compare(key, a, b));
    sorted
}

/// The visible slice of a list behind a "show more" control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a Transaction>,
    /// Entries hidden behind "show more".
    pub remaining: usize,
}

pub fn paginate<'a>(list: &[&'a Transaction], page_size: usize, show_all: bool) -> Page<'a> {
    let visible = if show_all {
        list.len()
    } else {
        page_size.min(list.len())
    };
    Page {
        items: list[..visible].to_vec(),
        remaining: list.len() - visible,
    }
}
