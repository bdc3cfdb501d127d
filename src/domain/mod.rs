pub mod account;
pub mod category;
pub mod ids;
pub mod ledger;
pub mod transaction;
