use serde::{Deserialize, Serialize};
use std::fmt;

pub const OTHER: &str = "other";

/// Built-in expense categories offered by the transaction form, with their
/// display labels. Any other non-empty label is accepted as well.
pub const BUILT_IN: [(&str, &str); 7] = [
    ("housing", "Housing"),
    ("food", "Food"),
    ("transport", "Transport"),
    ("leisure", "Leisure"),
    ("health", "Health"),
    ("education", "Education"),
    (OTHER, "Other"),
];

/// Expense bucket. Stored trimmed and lowercase so filters compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Normalizes `label`; blank labels fall back to [`Category::other`].
    pub fn new(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            Self::other()
        } else {
            Self(label)
        }
    }

    pub fn other() -> Self {
        Self(OTHER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> &str {
        BUILT_IN
            .iter()
            .find(|(key, _)| *key == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(&self.0)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::other()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
