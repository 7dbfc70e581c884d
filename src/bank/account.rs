//! Account model and authentication for the ATM.
use std::fmt;

use crate::bank::types::{AccountNumber, Money, Pin, Role, format_money};

/// The role-specific part of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// A regular customer, holding the PIN used to log in.
    User { pin: Pin },
    /// A bank administrator.
    Admin,
}

/// Represents a bank account held by a user or an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The account number, fixed at creation.
    account_number: AccountNumber,

    /// The name of the account holder, fixed at creation.
    holder_name: String,

    /// The current balance. Only cash withdrawal changes it.
    pub(super) balance: Money,

    /// The registered mobile number. Only the guarded update changes it.
    pub(super) mobile_number: String,

    /// Whether this is a user or an admin account, with the user's PIN.
    kind: AccountKind,
}

impl Account {
    /// Creates a user account protected by `pin`.
    pub fn user(
        account_number: AccountNumber,
        holder_name: impl Into<String>,
        pin: Pin,
        balance: Money,
        mobile_number: impl Into<String>,
    ) -> Self {
        Account {
            account_number,
            holder_name: holder_name.into(),
            balance,
            mobile_number: mobile_number.into(),
            kind: AccountKind::User { pin },
        }
    }

    /// Creates an administrator account.
    pub fn admin(
        account_number: AccountNumber,
        holder_name: impl Into<String>,
        balance: Money,
        mobile_number: impl Into<String>,
    ) -> Self {
        Account {
            account_number,
            holder_name: holder_name.into(),
            balance,
            mobile_number: mobile_number.into(),
            kind: AccountKind::Admin,
        }
    }

    /// Gets the account number.
    pub fn get_account_number(&self) -> AccountNumber {
        self.account_number
    }

    /// Gets the name of the account holder.
    pub fn get_holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Gets the current balance.
    pub fn get_balance(&self) -> Money {
        self.balance
    }

    /// Gets the registered mobile number.
    pub fn get_mobile_number(&self) -> &str {
        &self.mobile_number
    }

    /// Gets the role-specific part of the account.
    #[cfg(test)]
    pub fn get_kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Gets the role this account logs in as.
    pub fn get_role(&self) -> Role {
        match self.kind {
            AccountKind::User { .. } => Role::User,
            AccountKind::Admin => Role::Admin,
        }
    }

    /// Checks `candidate` against the stored PIN.
    /// Admin accounts carry no PIN and never match here.
    pub fn authenticate(&self, candidate: Pin) -> bool {
        matches!(self.kind, AccountKind::User { pin } if pin == candidate)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.get_role() {
            Role::User => "User",
            Role::Admin => "Admin",
        };
        writeln!(f, "*** {title} Details are :-")?;
        writeln!(f, "-> Account no  : {}", self.get_account_number())?;
        writeln!(f, "-> Name        : {}", self.get_holder_name())?;
        writeln!(f, "-> Balance     : {}", format_money(self.get_balance()))?;
        write!(f, "-> Mobile No.  : {}", self.get_mobile_number())
    }
}
