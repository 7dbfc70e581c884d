//! The `config` module holds the accounts an ATM session starts from.
use std::{io, path::Path};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, de};
use thiserror::Error;

use crate::bank::{
    Account, DECIMAL_PRECISION,
    types::{AccountNumber, Money, Pin, Role},
};

/// PIN used by both built-in accounts.
pub const DEFAULT_PIN: Pin = 1234;

/// Shown from the role selection screen.
pub const DEFAULT_SUPPORT_CONTACT: &str =
    "Visit your nearest branch or write to support@atm.example";

/// Everything the controller needs to run a session.
#[derive(Debug, Clone)]
pub struct AtmConfig {
    /// The single user account.
    pub user: Account,
    /// The single administrator account.
    pub admin: Account,
    /// PIN the administrator logs in with.
    pub admin_pin: Pin,
    /// Contact details printed on request.
    pub support_contact: String,
}

impl Default for AtmConfig {
    fn default() -> Self {
        AtmConfig {
            user: Account::user(
                987654321,
                "Hardik",
                DEFAULT_PIN,
                50_000 * DECIMAL_PRECISION,
                "9370054900",
            ),
            admin: Account::admin(
                123456789,
                "Admin",
                1_000_000 * DECIMAL_PRECISION,
                "9876543210",
            ),
            admin_pin: DEFAULT_PIN,
            support_contact: DEFAULT_SUPPORT_CONTACT.to_string(),
        }
    }
}

/// Custom deserializer for decimal balances to the fixed-point representation.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    let bound = (Money::MAX / DECIMAL_PRECISION) as f64;
    if !value.is_finite() || value.abs() > bound {
        return Err(de::Error::custom(format!("balance {value} is out of range")));
    }
    Ok((value * DECIMAL_PRECISION as f64).round() as Money)
}

/// One row of an account seed file.
#[derive(Deserialize, Debug)]
struct AccountRecord {
    role: Role,

    #[serde(rename = "account")]
    account_number: AccountNumber,

    #[serde(rename = "name")]
    holder_name: String,

    #[serde(deserialize_with = "deserialize_money")]
    balance: Money,

    #[serde(rename = "mobile")]
    mobile_number: String,

    pin: Option<Pin>,
}

impl AtmConfig {
    /// Loads the accounts from a CSV seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        Self::from_records(reader)
    }

    /// Loads the accounts from CSV data with a `role,account,name,balance,mobile,pin` header.
    #[cfg(test)]
    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self, ConfigError> {
        let reader = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
        Self::from_records(reader)
    }

    fn from_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, ConfigError> {
        let mut user = None;
        let mut admin = None;

        for record in reader.deserialize::<AccountRecord>() {
            let record = record?;
            if record.balance < 0 {
                return Err(ConfigError::NegativeBalance(record.role));
            }
            let pin = record.pin.ok_or(ConfigError::MissingPin(record.role))?;
            let slot = match record.role {
                Role::User => &mut user,
                Role::Admin => &mut admin,
            };
            if slot.is_some() {
                return Err(ConfigError::DuplicateAccount(record.role));
            }
            *slot = Some(record_to_account(record, pin));
        }

        let (user, _) = user.ok_or(ConfigError::MissingAccount(Role::User))?;
        let (admin, admin_pin) = admin.ok_or(ConfigError::MissingAccount(Role::Admin))?;
        Ok(AtmConfig {
            user,
            admin,
            admin_pin,
            support_contact: DEFAULT_SUPPORT_CONTACT.to_string(),
        })
    }
}

fn record_to_account(record: AccountRecord, pin: Pin) -> (Account, Pin) {
    let account = match record.role {
        Role::User => Account::user(
            record.account_number,
            record.holder_name,
            pin,
            record.balance,
            record.mobile_number,
        ),
        Role::Admin => Account::admin(
            record.account_number,
            record.holder_name,
            record.balance,
            record.mobile_number,
        ),
    };
    (account, pin)
}

/// Errors that can occur while loading an account seed file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read accounts: {0}")]
    Csv(#[from] csv::Error),
    #[error("No {0} account defined")]
    MissingAccount(Role),
    #[error("More than one {0} account defined")]
    DuplicateAccount(Role),
    #[error("The {0} account has no PIN")]
    MissingPin(Role),
    #[error("The {0} account has a negative balance")]
    NegativeBalance(Role),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "\
role,account,name,balance,mobile,pin
user, 11, Alice, 120.5, 555-0100, 4321
admin, 22, Root, 9000, 555-0199, 9999
";

    #[test]
    fn test_default_literals() {
        let config = AtmConfig::default();
        assert_eq!(config.user.get_account_number(), 987654321);
        assert_eq!(config.user.get_holder_name(), "Hardik");
        assert_eq!(config.user.get_balance(), 500_000_000);
        assert_eq!(config.user.get_mobile_number(), "9370054900");
        assert!(config.user.authenticate(1234));
        assert_eq!(config.admin.get_account_number(), 123456789);
        assert_eq!(config.admin.get_balance(), 10_000_000_000);
        assert_eq!(config.admin.get_role(), Role::Admin);
        assert_eq!(config.admin_pin, 1234);
    }

    #[test]
    fn test_from_reader() {
        let config = AtmConfig::from_reader(SEED.as_bytes()).unwrap();
        assert_eq!(config.user.get_account_number(), 11);
        assert_eq!(config.user.get_holder_name(), "Alice");
        assert_eq!(config.user.get_balance(), 1_205_000);
        assert!(config.user.authenticate(4321));
        assert_eq!(config.admin.get_holder_name(), "Root");
        assert_eq!(config.admin.get_mobile_number(), "555-0199");
        assert_eq!(config.admin_pin, 9999);
    }

    #[test]
    fn test_missing_admin() {
        let seed = "role,account,name,balance,mobile,pin\nuser,1,A,10,1,1\n";
        assert!(matches!(
            AtmConfig::from_reader(seed.as_bytes()),
            Err(ConfigError::MissingAccount(Role::Admin))
        ));
    }

    #[test]
    fn test_duplicate_user() {
        let seed = "role,account,name,balance,mobile,pin\nuser,1,A,10,1,1\nuser,2,B,10,2,2\n";
        assert!(matches!(
            AtmConfig::from_reader(seed.as_bytes()),
            Err(ConfigError::DuplicateAccount(Role::User))
        ));
    }

    #[test]
    fn test_missing_pin() {
        let seed = "role,account,name,balance,mobile,pin\nuser,1,A,10,1,1\nadmin,2,B,10,2,\n";
        assert!(matches!(
            AtmConfig::from_reader(seed.as_bytes()),
            Err(ConfigError::MissingPin(Role::Admin))
        ));
    }

    #[test]
    fn test_negative_balance() {
        let seed = "role,account,name,balance,mobile,pin\nuser,1,A,-10,1,1\n";
        assert!(matches!(
            AtmConfig::from_reader(seed.as_bytes()),
            Err(ConfigError::NegativeBalance(Role::User))
        ));
    }

    #[test]
    fn test_non_finite_balance() {
        for balance in ["NaN", "inf", "-inf", "1e300", "922337203685478"] {
            let seed = format!(
                "role,account,name,balance,mobile,pin\nuser,1,A,{balance},1,1\nadmin,2,B,10,2,2\n"
            );
            assert!(
                matches!(
                    AtmConfig::from_reader(seed.as_bytes()),
                    Err(ConfigError::Csv(_))
                ),
                "balance {balance} was accepted"
            );
        }
    }

    #[test]
    fn test_largest_balance() {
        let seed = "role,account,name,balance,mobile,pin\nuser,1,A,922337203685477,1,1\nadmin,2,B,10,2,2\n";
        let config = AtmConfig::from_reader(seed.as_bytes()).unwrap();
        assert!(config.user.get_balance() > 0);
    }

    #[test]
    fn test_unknown_role() {
        let seed = "role,account,name,balance,mobile,pin\nguest,1,A,10,1,1\n";
        assert!(matches!(
            AtmConfig::from_reader(seed.as_bytes()),
            Err(ConfigError::Csv(_))
        ));
    }
}
