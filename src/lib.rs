//! Personal finance ledger: accounts, income/expense/transfer history with
//! balances kept in step, per-user identity, read-only query views and a
//! persisted session façade.

pub mod app;
pub mod common;
pub mod domain;
pub mod identity;
pub mod io;
pub mod query;
pub mod services;
pub mod tracker;
pub mod worker;

pub use tracker::Tracker;
