use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    common::money::Money,
    domain::{
        category::{Category, OTHER},
        ids::{AccountId, TransactionId},
    },
};

/// A recorded movement of money. Never edited in place: the only way to
/// change one is to delete it (which reverses its balance effect) and add a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Always strictly positive; direction comes from `kind`.
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: TransactionKind,
}

/// Per-type fields. Serialized flat next to the transaction fields with a
/// `type` tag, e.g. `{"type":"transfer","accountId":..,"toAccountId":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    Income {
        #[serde(rename = "accountId")]
        account_id: AccountId,
    },
    Expense {
        #[serde(rename = "accountId")]
        account_id: AccountId,
        #[serde(default)]
        category: Category,
    },
    Transfer {
        #[serde(rename = "accountId")]
        account_id: AccountId,
        #[serde(rename = "toAccountId")]
        to_account_id: AccountId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
    Transfer,
}

impl TxType {
    pub const ALL: [TxType; 3] = [TxType::Income, TxType::Expense, TxType::Transfer];

    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
            TxType::Transfer => "transfer",
        }
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            "transfer" => Ok(TxType::Transfer),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transaction {
    pub fn tx_type(&self) -> TxType {
        match self.kind {
            TransactionKind::Income { .. } => TxType::Income,
            TransactionKind::Expense { .. } => TxType::Expense,
            TransactionKind::Transfer { .. } => TxType::Transfer,
        }
    }

    /// Source account (the only account for income and expense).
    pub fn account_id(&self) -> &AccountId {
        match &self.kind {
            TransactionKind::Income { account_id }
            | TransactionKind::Expense { account_id, .. }
            | TransactionKind::Transfer { account_id, .. } => account_id,
        }
    }

    pub fn to_account_id(&self) -> Option<&AccountId> {
        match &self.kind {
            TransactionKind::Transfer { to_account_id, .. } => Some(to_account_id),
            _ => None,
        }
    }

    /// Category key; income and transfers fall in the "other" bucket.
    pub fn category(&self) -> &str {
        match &self.kind {
            TransactionKind::Expense { category, .. } => category.as_str(),
            _ => OTHER,
        }
    }

    pub fn touches(&self, account: &AccountId) -> bool {
        self.account_id() == account || self.to_account_id() == Some(account)
    }
}
