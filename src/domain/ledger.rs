use serde::{Deserialize, Serialize};

use crate::domain::{
    account::Account,
    ids::{AccountId, TransactionId},
    transaction::Transaction,
};

/// One user's accounts and transaction history, both in insertion order.
///
/// Fields are crate-private: balances change only through the handlers in
/// `worker`, which keep every balance equal to its opening balance plus the
/// effect of the transactions currently present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub(crate) accounts: Vec<Account>,
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub(crate) fn account_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| &a.id == id)
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub(crate) fn transaction_index(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| &t.id == id)
    }

    /// Transactions that name `account` as source or destination.
    pub fn transactions_touching<'a>(
        &'a self,
        account: &'a AccountId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |t| t.touches(account))
    }
}
