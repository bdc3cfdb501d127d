//! Key-value persistence of the whole identity store, the session user and
//! the user's preferences. Values are JSON strings.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{common::config::Settings, common::error::StoreError, identity::store::IdentityStore};

pub const USERS_DB: &str = "users_db";
pub const CURRENT_USER: &str = "current_user";
pub const SETTINGS: &str = "settings";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Readers only ever see a complete file.
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

pub fn load_users(store: &impl KeyValueStore) -> Result<IdentityStore, StoreError> {
    match store.get(USERS_DB)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(IdentityStore::new()),
    }
}

pub fn save_users(store: &mut impl KeyValueStore, users: &IdentityStore) -> Result<(), StoreError> {
    let raw = serde_json::to_string(users)?;
    store.set(USERS_DB, &raw)?;
    tracing::debug!(users = users.users().len(), bytes = raw.len(), "users snapshot written");
    Ok(())
}

pub fn load_current_user(store: &impl KeyValueStore) -> Result<Option<String>, StoreError> {
    Ok(store.get(CURRENT_USER)?.filter(|u| !u.trim().is_empty()))
}

pub fn save_current_user(
    store: &mut impl KeyValueStore,
    username: Option<&str>,
) -> Result<(), StoreError> {
    match username {
        Some(u) => store.set(CURRENT_USER, u),
        None => store.remove(CURRENT_USER),
    }
}

/// Missing or unreadable preferences fall back to defaults.
pub fn load_settings(store: &impl KeyValueStore) -> Result<Settings, StoreError> {
    let Some(raw) = store.get(SETTINGS)? else {
        return Ok(Settings::default());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable settings");
        Settings::default()
    }))
}

pub fn save_settings(
    store: &mut impl KeyValueStore,
    settings: &Settings,
) -> Result<(), StoreError> {
    store.set(SETTINGS, &serde_json::to_string(settings)?)
}
