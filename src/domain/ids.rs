//! Opaque identifiers for accounts and transactions.
//!
//! Fresh ids are UUID v7 strings, so later ids compare greater than earlier
//! ones. Stored ids are accepted as-is (any non-empty string).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

macro_rules! id_type {
    ($name:ident) => {
        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(concat!(stringify!($name), " must not be empty").to_string());
                }
                Ok(Self(s.to_string()))
            }
        }
        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
id_type!(AccountId);
id_type!(TransactionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_increasing() {
        let first = TransactionId::generate();
        let second = TransactionId::generate();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(AccountId::from_str("  ").is_err());
        assert_eq!(AccountId::from_str(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn owned_and_borrowed_strings_convert_alike() {
        assert_eq!(AccountId::from(String::from("bank")), AccountId::from("bank"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = AccountId::from("legacy-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"legacy-1\"");
    }
}
