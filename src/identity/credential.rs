use serde::{Deserialize, Serialize};

use crate::common::{config::CredentialPolicy, error::AppError};

/// A salted bcrypt hash. The plain password is never stored.
///
/// Older stores hold the password as unpadded hex of its UTF-16 code units.
/// Those still verify, and [`Credential::is_legacy`] flags them so a
/// successful login can replace them with a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Checks `password` against `policy` and hashes it with a fresh salt.
    pub fn create(password: &str, policy: &CredentialPolicy, cost: u32) -> Result<Self, AppError> {
        policy.check(password)?;
        Self::rehash(password, cost)
    }

    /// Hashes an already accepted password without re-checking the policy.
    pub fn rehash(password: &str, cost: u32) -> Result<Self, AppError> {
        Ok(Self(bcrypt::hash(password, cost)?))
    }

    /// A stored hash that cannot be parsed never matches.
    pub fn verify(&self, password: &str) -> bool {
        if self.is_legacy() {
            return !self.0.is_empty() && legacy_hex(password) == self.0;
        }
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }

    pub fn is_legacy(&self) -> bool {
        !self.0.starts_with("$2")
    }
}

fn legacy_hex(password: &str) -> String {
    password.encode_utf16().map(|unit| format!("{unit:x}")).collect()
}
