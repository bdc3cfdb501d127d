use serde::{Deserialize, Serialize};

use crate::{
    common::{
        config::LedgerConfig,
        error::{AppError, LedgerError},
    },
    domain::ledger::Ledger,
    identity::credential::Credential,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(alias = "password")]
    pub credential: Credential,
    #[serde(default, alias = "data")]
    pub ledger: Ledger,
}

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub username: String,
}

/// Every registered user with their private ledger. Users are never deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityStore {
    users: Vec<User>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn contains(&self, username: &str) -> bool {
        self.user(username).is_some()
    }

    fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    /// Adds a user with an empty ledger.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        config: &LedgerConfig,
    ) -> Result<(), AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LedgerError::validation("username is required").into());
        }
        if self.contains(username) {
            return Err(LedgerError::Conflict(username.to_string()).into());
        }
        let credential = Credential::create(password, &config.credential_policy, config.hash_cost)?;

        self.users.push(User {
            username: username.to_string(),
            credential,
            ledger: Ledger::new(),
        });
        tracing::info!(%username, "user registered");
        Ok(())
    }

    /// Unknown users and wrong passwords fail the same way.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserSession, LedgerError> {
        let username = username.trim();
        match self.user(username) {
            Some(user) if user.credential.verify(password) => Ok(UserSession {
                username: user.username.clone(),
            }),
            _ => {
                tracing::info!(%username, "login rejected");
                Err(LedgerError::Auth)
            }
        }
    }

    /// Replaces a legacy hex credential with a bcrypt hash of `password`.
    /// Call only after `password` has been authenticated. Returns whether the
    /// stored credential changed.
    pub fn upgrade_credential(
        &mut self,
        username: &str,
        password: &str,
        cost: u32,
    ) -> Result<bool, AppError> {
        let Some(user) = self.user_mut(username.trim()) else {
            return Ok(false);
        };
        if !user.credential.is_legacy() {
            return Ok(false);
        }
        user.credential = Credential::rehash(password, cost)?;
        tracing::info!(username = %user.username, "legacy credential rehashed");
        Ok(true)
    }

    pub fn change_credential(
        &mut self,
        username: &str,
        new_password: &str,
        config: &LedgerConfig,
    ) -> Result<(), AppError> {
        let username = username.trim();
        if !self.contains(username) {
            return Err(LedgerError::not_found("user", username).into());
        }
        let credential =
            Credential::create(new_password, &config.credential_policy, config.hash_cost)?;
        if let Some(user) = self.user_mut(username) {
            user.credential = credential;
        }
        tracing::info!(%username, "credential changed");
        Ok(())
    }

    pub fn ledger(&self, username: &str) -> Option<&Ledger> {
        self.user(username).map(|u| &u.ledger)
    }

    pub fn ledger_mut(&mut self, username: &str) -> Option<&mut Ledger> {
        self.user_mut(username).map(|u| &mut u.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LedgerConfig {
        LedgerConfig {
            hash_cost: 4,
            ..LedgerConfig::default()
        }
    }

    #[test]
    fn register_then_authenticate() {
        let mut store = IdentityStore::new();
        store.register("ana", "Secret#12", &config()).unwrap();

        let session = store.authenticate("ana", "Secret#12").unwrap();

        assert_eq!(session.username, "ana");
        assert_eq!(store.ledger("ana"), Some(&Ledger::new()));
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let mut store = IdentityStore::new();
        store.register("ana", "Secret#12", &config()).unwrap();

        let err = store.register(" ana ", "Other#123", &config()).unwrap_err();

        assert!(matches!(err, AppError::Ledger(LedgerError::Conflict(_))));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn wrong_password_and_unknown_user_fail_alike() {
        let mut store = IdentityStore::new();
        store.register("ana", "Secret#12", &config()).unwrap();

        assert_eq!(store.authenticate("ana", "secret#12"), Err(LedgerError::Auth));
        assert_eq!(store.authenticate("bob", "Secret#12"), Err(LedgerError::Auth));
    }

    #[test]
    fn change_credential_replaces_the_password() {
        let mut store = IdentityStore::new();
        store.register("ana", "Secret#12", &config()).unwrap();

        store.change_credential("ana", "Fresh#456", &config()).unwrap();

        assert!(store.authenticate("ana", "Secret#12").is_err());
        assert!(store.authenticate("ana", "Fresh#456").is_ok());
    }

    #[test]
    fn change_credential_of_unknown_user_is_not_found() {
        let mut store = IdentityStore::new();

        let err = store
            .change_credential("ghost", "Fresh#456", &config())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::NotFound { kind: "user", .. })
        ));
    }

    #[test]
    fn legacy_password_record_is_upgraded_after_login() {
        let raw = r#"[{"username":"ana","password":"53656372657423313232",
            "data":{"accounts":[],"transactions":[]}}]"#;
        let mut store: IdentityStore = serde_json::from_str(raw).unwrap();

        store.authenticate("ana", "Secret#122").unwrap();
        assert!(store.upgrade_credential("ana", "Secret#122", 4).unwrap());
        assert!(!store.upgrade_credential("ana", "Secret#122", 4).unwrap());

        let json = serde_json::to_value(&store).unwrap();
        assert!(json[0]["credential"].as_str().unwrap().starts_with("$2"));
        assert!(json[0].get("password").is_none());
        assert!(store.authenticate("ana", "Secret#122").is_ok());
    }

    #[test]
    fn stored_shape_nests_ledger_under_user() {
        let mut store = IdentityStore::new();
        store.register("ana", "Secret#12", &config()).unwrap();

        let json = serde_json::to_value(&store).unwrap();

        assert_eq!(json[0]["username"], "ana");
        assert!(json[0]["credential"].is_string());
        assert!(json[0]["ledger"]["accounts"].is_array());
        assert!(json[0]["ledger"]["transactions"].is_array());
    }
}
