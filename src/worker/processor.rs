use chrono::NaiveDate;

use crate::{
    common::{
        config::LedgerConfig,
        date,
        error::LedgerError,
        event::LedgerCommand,
    },
    domain::{account::Account, ids::AccountId, ledger::Ledger, transaction::Transaction},
    worker::{
        Outcome,
        handlers::{
            add_transaction, create_account, delete_account, delete_transaction, update_account,
        },
    },
};

/// What a processed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    AccountCreated(Account),
    AccountUpdated(Account),
    AccountDeleted {
        id: AccountId,
        removed_transactions: usize,
    },
    TransactionAdded(Transaction),
    TransactionDeleted(Transaction),
}

/// Routes [`LedgerCommand`]s to their handlers against a caller-owned ledger.
#[derive(Debug, Default)]
pub struct Processor {
    config: LedgerConfig,
    fixed_today: Option<NaiveDate>,
}

impl Processor {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            fixed_today: None,
        }
    }

    /// Dates synthetic transactions with `today` instead of the local clock.
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(date::today)
    }

    pub fn process(
        &self,
        ledger: &mut Ledger,
        command: LedgerCommand,
    ) -> Result<Outcome<Applied>, LedgerError> {
        let today = self.today();
        let outcome = match command {
            LedgerCommand::CreateAccount {
                name,
                initial_balance,
            } => {
                let out =
                    create_account::handle(ledger, &name, initial_balance, today, &self.config)?;
                tracing::info!(
                    account = %out.value.id,
                    balance = %out.value.balance,
                    "account created"
                );
                out.map(Applied::AccountCreated)
            }
            LedgerCommand::UpdateAccount { id, name, balance } => {
                let out = update_account::handle(ledger, &id, &name, balance, today, &self.config)?;
                tracing::info!(account = %id, balance = %balance, "account updated");
                out.map(Applied::AccountUpdated)
            }
            LedgerCommand::DeleteAccount {
                id,
                confirm_cascade,
            } => {
                let out = delete_account::handle(ledger, &id, confirm_cascade)?;
                tracing::info!(account = %id, removed = out.value, "account deleted");
                out.map(|removed_transactions| Applied::AccountDeleted {
                    id,
                    removed_transactions,
                })
            }
            LedgerCommand::AddTransaction(input) => {
                let out = add_transaction::handle(ledger, input, &self.config)?;
                tracing::info!(
                    transaction = %out.value.id,
                    kind = %out.value.tx_type(),
                    amount = %out.value.amount,
                    "transaction added"
                );
                out.map(Applied::TransactionAdded)
            }
            LedgerCommand::DeleteTransaction { id } => {
                let out = delete_transaction::handle(ledger, &id)?;
                tracing::info!(transaction = %id, "transaction deleted");
                out.map(Applied::TransactionDeleted)
            }
        };

        for warning in &outcome.warnings {
            tracing::warn!(%warning, "ledger consistency warning");
        }
        Ok(outcome)
    }
}
