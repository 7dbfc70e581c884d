//! Transactions that mutate an account: cash withdrawal and mobile number update.
use thiserror::Error;
use tracing::debug;

use crate::bank::{Account, types::Money};

impl Account {
    /// Withdraws `amount` and returns the new balance.
    /// The amount must be positive and strictly less than the current balance.
    pub fn cash_withdraw(&mut self, amount: Money) -> Result<Money, TransactionError> {
        if amount > 0 && amount < self.balance {
            self.balance -= amount;
            debug!(account = self.get_account_number(), amount, "cash withdrawn");
            Ok(self.balance)
        } else {
            debug!(account = self.get_account_number(), amount, "withdrawal rejected");
            Err(TransactionError::InvalidAmountOrInsufficientBalance)
        }
    }

    /// Replaces the mobile number when `previous` matches the stored one.
    pub fn set_mobile(
        &mut self,
        previous: &str,
        new: impl Into<String>,
    ) -> Result<(), TransactionError> {
        if previous != self.mobile_number {
            debug!(account = self.get_account_number(), "mobile update rejected");
            return Err(TransactionError::IncorrectMobileNumber);
        }
        self.mobile_number = new.into();
        debug!(account = self.get_account_number(), "mobile number updated");
        Ok(())
    }
}

/// Errors that can occur while processing a transaction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid Input or Insufficient Balance")]
    InvalidAmountOrInsufficientBalance,
    #[error("Incorrect !!! Old Mobile no")]
    IncorrectMobileNumber,
}
