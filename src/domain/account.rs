use serde::{Deserialize, Serialize};

use crate::{common::money::Money, domain::ids::AccountId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Current balance. Only the worker handlers change it.
    pub balance: Money,
    /// Part of the balance that no transaction accounts for (a negative
    /// starting balance). Zero for every other account.
    #[serde(default)]
    pub opening_balance: Money,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AccountId::generate(),
            name: name.into(),
            balance: Money::zero(),
            opening_balance: Money::zero(),
        }
    }

    pub fn with_opening_balance(name: impl Into<String>, opening: Money) -> Self {
        Self {
            balance: opening,
            opening_balance: opening,
            ..Self::new(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_balance_seeds_the_balance() {
        let acc = Account::with_opening_balance("Card", Money::new(-500_000));
        assert_eq!(acc.balance, Money::new(-500_000));
        assert_eq!(acc.opening_balance, acc.balance);
    }

    #[test]
    fn stored_accounts_without_opening_balance_default_to_zero() {
        let acc: Account =
            serde_json::from_str(r#"{"id":"a1","name":"Wallet","balance":100}"#).unwrap();
        assert_eq!(acc.balance, Money::new(1_000_000));
        assert_eq!(acc.opening_balance, Money::zero());
    }
}
