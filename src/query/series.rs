use chrono::{Days, NaiveDate};

use crate::{
    common::money::Money,
    domain::{
        ids::AccountId,
        transaction::{Transaction, TxType},
    },
    worker::handlers::balance::effect_on,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

/// One point per day for the `window_days` days ending at `reference`, oldest
/// first, zero-filled. Net is income minus expense minus transfers, i.e. a
/// transfer counts as money leaving.
pub fn daily_series(
    list: &[&Transaction],
    window_days: u32,
    reference: NaiveDate,
) -> Vec<DailyPoint> {
    build(list, window_days, reference, |t| match t.tx_type() {
        TxType::Income => (t.amount, Money::zero(), t.amount),
        TxType::Expense => (Money::zero(), t.amount, -t.amount),
        TxType::Transfer => (Money::zero(), Money::zero(), -t.amount),
    })
}

/// Same window, seen from one account: a transfer out lowers its net and a
/// transfer in raises it. Entries not touching the account contribute nothing.
pub fn daily_series_for_account(
    list: &[&Transaction],
    window_days: u32,
    reference: NaiveDate,
    account: &AccountId,
) -> Vec<DailyPoint> {
    build(list, window_days, reference, |t| {
        let net = effect_on(t, account);
        match t.tx_type() {
            TxType::Income => (net, Money::zero(), net),
            TxType::Expense => (Money::zero(), -net, net),
            TxType::Transfer => (Money::zero(), Money::zero(), net),
        }
    })
}

fn build(
    list: &[&Transaction],
    window_days: u32,
    reference: NaiveDate,
    contribution: impl Fn(&Transaction) -> (Money, Money, Money),
) -> Vec<DailyPoint> {
    if window_days == 0 {
        return Vec::new();
    }
    let Some(start) = reference.checked_sub_days(Days::new(u64::from(window_days) - 1)) else {
        return Vec::new();
    };

    let mut points: Vec<DailyPoint> = start
        .iter_days()
        .take(window_days as usize)
        .map(|date| DailyPoint {
            date,
            income: Money::zero(),
            expense: Money::zero(),
            net: Money::zero(),
        })
        .collect();

    for t in list.iter().filter(|t| start <= t.date && t.date <= reference) {
        let index = (t.date - start).num_days() as usize;
        if let Some(point) = points.get_mut(index) {
            let (income, expense, net) = contribution(*t);
            point.income += income;
            point.expense += expense;
            point.net += net;
        }
    }
    points
}
