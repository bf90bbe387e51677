//! Exact fixed-point money amounts.
//!
//! Every amount in the app has exactly two fractional digits. Amounts are
//! stored in the database as text (e.g. "45.00") so that reading a value back
//! yields exactly what was written.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The number of fractional digits kept for every amount.
pub const AMOUNT_SCALE: u32 = 2;

/// The largest magnitude that fits in a `DECIMAL(10, 2)` column.
const MAX_WHOLE_DIGITS: u32 = 8;

/// An amount of money with exactly two fractional digits.
///
/// Arithmetic is exact. Values with more than two fractional digits are
/// rounded half away from zero when the amount is created.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero dollars.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount from a decimal, rounding to two decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(AMOUNT_SCALE);

        Self(rounded)
    }

    /// Parse an amount entered by a user, e.g. "45", "1,200.5" or "$85.43".
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `text` is not a number or if it does
    /// not fit in ten digits with two fractional digits.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let cleaned: String = text
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| Error::InvalidAmount(text.trim().to_owned()))?;
        let amount = Self::new(value);

        if amount.0.abs() >= Decimal::from(10_i64.pow(MAX_WHOLE_DIGITS)) {
            return Err(Error::InvalidAmount(text.trim().to_owned()));
        }

        Ok(amount)
    }

    /// The underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is less than zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Convert to a float for chart libraries that only accept `f64`.
    ///
    /// Only use this for display. Never sum the result.
    pub fn to_f64_lossy(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;

        self.0.to_f64().unwrap_or_default()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        Decimal::from_str(text)
            .map(Amount::new)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Format an amount as dollars with thousands separators, e.g. "-$1,285.43".
pub fn format_currency(amount: Amount) -> String {
    let digits = amount.0.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((&digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };

    format!("{sign}${grouped}.{fraction}")
}
