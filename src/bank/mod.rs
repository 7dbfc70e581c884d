//! Banking module for handling accounts, transactions, configuration and the ATM menu.
mod account;
mod config;
mod menu;
mod transaction;
mod types;

pub use account::*;
pub use config::*;
pub use menu::*;
pub use transaction::*;
pub use types::*;
