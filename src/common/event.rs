use chrono::NaiveDate;

use crate::{
    common::money::Money,
    domain::{
        category::Category,
        ids::{AccountId, TransactionId},
        transaction::TxType,
    },
};

/// A mutation request sent from the presentation layer (or the CSV reader)
/// to the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    CreateAccount {
        name: String,
        initial_balance: Money,
    },
    UpdateAccount {
        id: AccountId,
        name: String,
        balance: Money,
    },
    DeleteAccount {
        id: AccountId,
        /// The user agreed to drop the account's transactions with it.
        confirm_cascade: bool,
    },
    AddTransaction(NewTransaction),
    DeleteTransaction {
        id: TransactionId,
    },
}

/// Transaction form input, as collected before validation. The engine turns it
/// into a [`crate::domain::transaction::TransactionKind`] or rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub tx_type: TxType,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub account_id: AccountId,
    /// Required for transfers, rejected for anything else.
    pub to_account_id: Option<AccountId>,
    /// Expense bucket; `None` means "other". Ignored for income and transfers.
    pub category: Option<Category>,
}

impl NewTransaction {
    pub fn income(account: &AccountId, description: &str, amount: Money, date: NaiveDate) -> Self {
        Self {
            tx_type: TxType::Income,
            description: description.to_string(),
            amount,
            date,
            account_id: account.clone(),
            to_account_id: None,
            category: None,
        }
    }

    pub fn expense(
        account: &AccountId,
        description: &str,
        amount: Money,
        date: NaiveDate,
        category: &str,
    ) -> Self {
        Self {
            tx_type: TxType::Expense,
            category: Some(Category::new(category)),
            ..Self::income(account, description, amount, date)
        }
    }

    pub fn transfer(
        from: &AccountId,
        to: &AccountId,
        description: &str,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            tx_type: TxType::Transfer,
            to_account_id: Some(to.clone()),
            ..Self::income(from, description, amount, date)
        }
    }
}
