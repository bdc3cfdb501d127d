pub mod add_transaction;
pub mod audit;
pub mod balance;
pub mod create_account;
pub mod delete_account;
pub mod delete_transaction;
pub mod update_account;
