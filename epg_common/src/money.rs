use std::{
    borrow::Cow,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode,
    Encode,
    Sqlite,
    Type,
};
use thiserror::Error;

//--------------------------------------      Money       ------------------------------------------------------------
/// A monetary amount with exact decimal semantics.
///
/// Amounts in payment requests are summed and compared as decimals, never as binary floats, so
/// `100 + 13` is `113` and not `112.999999999`. The wire representation (form fields and the signed
/// message) is the normalized decimal string, i.e. `113` rather than `113.00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(String);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Whole currency units, e.g. `Money::from_major(100)` is Rs 100.
    pub fn from_major(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::from_major(value)
    }
}

impl FromStr for Money {
    type Err = MoneyConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|e| MoneyConversionError(format!("{s} is not a decimal. {e}")))?;
        Ok(Self(value))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// SQLite has no decimal column type, so amounts are stored as their canonical string form and
// parsed on the way out.
impl Type<Sqlite> for Money {
    fn type_info() -> SqliteTypeInfo {
        <&str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <&str as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Money {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        buf.push(SqliteArgumentValue::Text(Cow::Owned(self.0.to_string())));
        IsNull::No
    }
}

impl<'r> Decode<'r, Sqlite> for Money {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as Decode<Sqlite>>::decode(value)?;
        Ok(Self(Decimal::from_str(raw)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sums_are_exact() {
        let total = Money::from_major(100) + Money::from_major(13);
        assert_eq!(total, Money::from_major(113));
        assert_eq!(total.to_string(), "113");
    }

    #[test]
    fn fractional_sums_do_not_drift() {
        let total: Money = (0..10).map(|_| "0.1".parse::<Money>().unwrap()).sum();
        assert_eq!(total, Money::from_major(1));
        assert_eq!(total.to_string(), "1");
    }

    #[test]
    fn display_is_normalized() {
        assert_eq!("110.50".parse::<Money>().unwrap().to_string(), "110.5");
        assert_eq!("113.00".parse::<Money>().unwrap().to_string(), "113");
    }

    #[test]
    fn rejects_non_decimal_input() {
        assert!("12,5".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn negative_amounts_are_flagged() {
        assert!("-1".parse::<Money>().unwrap().is_negative());
        assert!(!Money::default().is_negative());
        assert!(!Money::from_major(10).is_negative());
    }
}
