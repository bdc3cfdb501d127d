pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod money;
