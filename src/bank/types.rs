//! Types used throughout the ATM.
use std::fmt;

use serde::Deserialize;

/// Decimal precision for monetary values.
/// Balances are stored as fixed-point integers with four decimal places.
pub const DECIMAL_PRECISION: i64 = 10_000;

/// Account number type, identifying a single bank account.
pub type AccountNumber = u64;

/// PIN type, the numeric credential checked at session start.
pub type Pin = u32;

/// Money type, representing a fixed-point monetary value.
pub type Money = i64;

/// The identity a session runs as. Selects which menu is exposed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Converts whole currency units into `Money`. Returns `None` on overflow.
pub fn money_from_units(units: i64) -> Option<Money> {
    units.checked_mul(DECIMAL_PRECISION)
}

/// Renders a fixed-point amount, dropping trailing zero decimals.
pub fn format_money(money: Money) -> String {
    let sign = if money < 0 { "-" } else { "" };
    let abs = money.unsigned_abs();
    let precision = DECIMAL_PRECISION.unsigned_abs();
    let units = abs / precision;
    let fraction = abs % precision;
    if fraction == 0 {
        return format!("{sign}{units}");
    }
    let digits = format!("{fraction:04}");
    format!("{sign}{units}.{}", digits.trim_end_matches('0'))
}
