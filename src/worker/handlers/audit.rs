use crate::{
    common::money::Money,
    domain::{ids::AccountId, ledger::Ledger},
    worker::handlers::balance::effect_on,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceMismatch {
    pub account: AccountId,
    /// Opening balance plus the effect of every transaction present.
    pub expected: Money,
    pub actual: Money,
}

/// Recomputes every balance from history. An empty result means the ledger
/// is consistent.
pub fn audit(ledger: &Ledger) -> Vec<BalanceMismatch> {
    ledger
        .accounts()
        .iter()
        .filter_map(|acc| {
            let expected = acc.opening_balance
                + ledger
                    .transactions()
                    .iter()
                    .map(|t| effect_on(t, &acc.id))
                    .sum::<Money>();
            (expected != acc.balance).then(|| BalanceMismatch {
                account: acc.id.clone(),
                expected,
                actual: acc.balance,
            })
        })
        .collect()
}
