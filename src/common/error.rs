use std::fmt;

/// Recoverable failures of ledger and identity operations. None of these leave
/// partial state behind: the operation is aborted before anything is mutated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("username already exists: {0}")]
    Conflict(String),
    #[error("invalid username or password")]
    Auth,
    #[error("account {account} has {transactions} transactions; confirm to delete them too")]
    CascadeNotConfirmed { account: String, transactions: usize },
    #[error("no user is logged in")]
    NotLoggedIn,
}

impl LedgerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub(crate) fn not_found(kind: &'static str, id: impl fmt::Display) -> Self {
        LedgerError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the read-only collaborators. They only ever turn a feed
/// `Unavailable`; ledger state is never involved.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("response is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no {0} rate in response")]
    MissingRate(String),
    #[error("invalid rate value: {0}")]
    InvalidRate(String),
    #[error("no tips for language {0}")]
    NoInsights(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("usage: pocket_ledger <store-dir> <user> [accounts | transactions | import <csv>]")]
    MissingArg,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("credential hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// A balance side that could not be adjusted because the account it names is
/// gone. The operation still completes; the warning travels with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyWarning {
    pub transaction: String,
    pub account: String,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction {} references missing account {}; balance side skipped",
            self.transaction, self.account
        )
    }
}
