use std::collections::BTreeMap;

use crate::{
    common::money::Money,
    domain::{
        ids::AccountId,
        ledger::Ledger,
        transaction::{Transaction, TxType},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`.
    pub net_balance: Money,
}

/// Income and expense totals. Transfers only move money between the user's
/// own accounts and count toward neither.
pub fn summarize(list: &[&Transaction]) -> Summary {
    let total = |ty: TxType| {
        list.iter()
            .filter(|t| t.tx_type() == ty)
            .map(|t| t.amount)
            .sum::<Money>()
    };
    let total_income = total(TxType::Income);
    let total_expense = total(TxType::Expense);
    Summary {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
    }
}

/// Expense totals per category key, for the breakdown chart.
pub fn group_by_category(list: &[&Transaction]) -> BTreeMap<String, Money> {
    let mut groups = BTreeMap::new();
    for t in list.iter().filter(|t| t.tx_type() == TxType::Expense) {
        *groups
            .entry(t.category().to_string())
            .or_insert_with(Money::zero) += t.amount;
    }
    groups
}

/// Balance of one account, or of all accounts together.
pub fn total_balance(ledger: &Ledger, account: Option<&AccountId>) -> Money {
    ledger
        .accounts()
        .iter()
        .filter(|a| account.is_none_or(|id| &a.id == id))
        .map(|a| a.balance)
        .sum()
}
