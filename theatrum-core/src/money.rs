//! Prices and totals held as integer cents.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::numbers::{i64_to_f64, parse_decimal, round_f64_to_i64};

/// A non-negative amount of money.
///
/// Stored as cents to keep totals exact; persisted as a dollar number so the
/// browser storage shape stays `{"price": 6}` / `"12.5"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Self = Self { cents: 0 };

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self {
            cents: if cents < 0 { 0 } else { cents },
        }
    }

    /// Convert a dollar amount, rounding to the nearest cent.
    #[must_use]
    pub fn from_dollars(dollars: f64) -> Self {
        Self::from_cents(round_f64_to_i64(dollars * 100.0))
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    #[must_use]
    pub fn dollars(self) -> f64 {
        i64_to_f64(self.cents) / 100.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Plain-text form used for scalar storage keys (`"12.5"`, `"12"`).
    #[must_use]
    pub fn to_storage_text(self) -> String {
        let whole = self.cents / 100;
        let frac = self.cents % 100;
        if frac == 0 {
            format!("{whole}")
        } else if frac % 10 == 0 {
            format!("{whole}.{}", frac / 10)
        } else {
            format!("{whole}.{frac:02}")
        }
    }
}

/// Lenient price parse for plain-text storage values (`"12.5"`, `"9abc"`).
#[must_use]
pub fn parse_price(text: &str) -> Money {
    Money::from_dollars(parse_decimal(text))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self::from_cents(self.cents.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents % 100 == 0 {
            serializer.serialize_i64(self.cents / 100)
        } else {
            serializer.serialize_f64(self.dollars())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_dollars(crate::numbers::decimal_from_value(
            &value,
        )))
    }
}
