use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::{
    common::error::LedgerError,
    domain::category::OTHER,
    query::{filter::Period, sort::SortKey},
};

/// Engine constants. Everything here has a sensible default; hosts override
/// only what they localize (the synthetic descriptions) or tune.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub default_category: String,
    pub initial_deposit_label: String,
    pub balance_adjustment_label: String,
    /// Transactions shown before "show more".
    pub page_size: usize,
    /// Trailing window of the trend series, in days.
    pub trend_days: u32,
    pub hash_cost: u32,
    pub credential_policy: CredentialPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_category: OTHER.to_string(),
            initial_deposit_label: "initial deposit".to_string(),
            balance_adjustment_label: "balance adjustment".to_string(),
            page_size: 5,
            trend_days: 7,
            hash_cost: bcrypt::DEFAULT_COST,
            credential_policy: CredentialPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_symbol: bool,
}

const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_symbol: true,
        }
    }
}

impl CredentialPolicy {
    /// Accepts nothing but a non-empty password when every rule is off.
    pub fn permissive() -> Self {
        Self {
            min_length: 1,
            require_uppercase: false,
            require_lowercase: false,
            require_symbol: false,
        }
    }

    pub fn check(&self, password: &str) -> Result<(), LedgerError> {
        if password.is_empty() {
            return Err(LedgerError::validation("password is required"));
        }
        if password.chars().count() < self.min_length {
            return Err(LedgerError::validation(format!(
                "password must have at least {} characters",
                self.min_length
            )));
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            return Err(LedgerError::validation(
                "password must contain an uppercase letter",
            ));
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            return Err(LedgerError::validation(
                "password must contain a lowercase letter",
            ));
        }
        if self.require_symbol && !password.chars().any(|c| SYMBOLS.contains(c)) {
            return Err(LedgerError::validation(
                "password must contain a special character",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodChoice {
    #[default]
    Current,
    Previous,
    All,
}

impl PeriodChoice {
    pub fn resolve(self, today: NaiveDate) -> Period {
        match self {
            PeriodChoice::Current => Period::current(today),
            PeriodChoice::Previous => Period::previous(today),
            PeriodChoice::All => Period::All,
        }
    }
}

/// Preferences persisted under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub language: String,
    pub sort: SortKey,
    pub period: PeriodChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "en".to_string(),
            sort: SortKey::DateDesc,
            period: PeriodChoice::Current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_requires_mixed_password() {
        let policy = CredentialPolicy::default();
        assert!(policy.check("Secret#12").is_ok());
        assert!(policy.check("short#A").is_err());
        assert!(policy.check("alllower#1").is_err());
        assert!(policy.check("ALLUPPER#1").is_err());
        assert!(policy.check("NoSymbol12").is_err());
        assert!(policy.check("").is_err());
    }

    #[test]
    fn permissive_policy_only_rejects_empty() {
        let policy = CredentialPolicy::permissive();
        assert!(policy.check("x").is_ok());
        assert!(policy.check("").is_err());
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.sort, SortKey::DateDesc);
        assert_eq!(s.language, "en");
    }

    #[test]
    fn period_choice_resolves_against_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(PeriodChoice::All.resolve(today), Period::All);
        assert_eq!(
            PeriodChoice::Previous.resolve(today),
            Period::Month { year: 2023, month: 12 }
        );
    }
}
