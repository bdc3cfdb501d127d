//! Session-level façade: one store, one logged-in user at a time. Every
//! successful mutation ends with a snapshot of the whole identity store.

use chrono::NaiveDate;

use crate::{
    common::{
        config::{LedgerConfig, Settings},
        error::{AppError, LedgerError},
        event::LedgerCommand,
    },
    domain::ledger::Ledger,
    identity::store::{IdentityStore, UserSession},
    io::storage::{self, KeyValueStore},
    worker::{
        Outcome,
        handlers::audit::audit,
        processor::{Applied, Processor},
    },
};

pub struct Tracker<S: KeyValueStore> {
    store: S,
    users: IdentityStore,
    settings: Settings,
    session: Option<UserSession>,
    processor: Processor,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads users and settings and restores the remembered session if that
    /// user still exists.
    pub fn open(mut store: S, config: LedgerConfig) -> Result<Self, AppError> {
        let users = storage::load_users(&store)?;
        let settings = storage::load_settings(&store)?;

        let session = match storage::load_current_user(&store)? {
            Some(username) if users.contains(&username) => Some(UserSession { username }),
            Some(username) => {
                tracing::warn!(%username, "remembered user no longer exists");
                storage::save_current_user(&mut store, None)?;
                None
            }
            None => None,
        };

        let tracker = Self {
            store,
            users,
            settings,
            session,
            processor: Processor::new(config),
        };
        tracker.check_active_ledger();
        Ok(tracker)
    }

    /// Dates synthetic transactions with `today` instead of the local clock.
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.processor = std::mem::take(&mut self.processor).with_fixed_date(today);
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        self.processor.config()
    }

    pub fn today(&self) -> NaiveDate {
        self.processor.today()
    }

    pub fn active_user(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    /// Creates the user and logs them in.
    pub fn register(&mut self, username: &str, password: &str) -> Result<UserSession, AppError> {
        self.users.register(username, password, self.processor.config())?;
        storage::save_users(&mut self.store, &self.users)?;
        self.login(username, password)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<UserSession, AppError> {
        let session = self.users.authenticate(username, password)?;
        let cost = self.processor.config().hash_cost;
        if self.users.upgrade_credential(&session.username, password, cost)? {
            storage::save_users(&mut self.store, &self.users)?;
        }
        storage::save_current_user(&mut self.store, Some(&session.username))?;
        tracing::info!(username = %session.username, "logged in");
        self.session = Some(session.clone());
        self.check_active_ledger();
        Ok(session)
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username, "logged out");
        }
        storage::save_current_user(&mut self.store, None)?;
        Ok(())
    }

    pub fn change_password(&mut self, new_password: &str) -> Result<(), AppError> {
        let username = self.require_session()?.username.clone();
        self.users
            .change_credential(&username, new_password, self.processor.config())?;
        storage::save_users(&mut self.store, &self.users)?;
        Ok(())
    }

    pub fn ledger(&self) -> Result<&Ledger, LedgerError> {
        let username = &self.require_session()?.username;
        self.users
            .ledger(username)
            .ok_or_else(|| LedgerError::not_found("user", username))
    }

    /// Applies `command` to the active user's ledger and persists the result.
    /// A rejected command changes nothing and writes nothing.
    pub fn execute(&mut self, command: LedgerCommand) -> Result<Outcome<Applied>, AppError> {
        let username = self.require_session()?.username.clone();
        let ledger = self
            .users
            .ledger_mut(&username)
            .ok_or_else(|| LedgerError::not_found("user", &username))?;

        let outcome = self.processor.process(ledger, command)?;
        storage::save_users(&mut self.store, &self.users)?;
        Ok(outcome)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn save_settings(&mut self, settings: Settings) -> Result<(), AppError> {
        storage::save_settings(&mut self.store, &settings)?;
        self.settings = settings;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn require_session(&self) -> Result<&UserSession, LedgerError> {
        self.session.as_ref().ok_or(LedgerError::NotLoggedIn)
    }

    fn check_active_ledger(&self) {
        let Ok(ledger) = self.ledger() else {
            return;
        };
        for mismatch in audit(ledger) {
            tracing::warn!(
                account = %mismatch.account,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "stored balance does not match transaction history"
            );
        }
    }
}
