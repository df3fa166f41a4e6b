//! Present-or-absent numeric value.
//!
//! Every arithmetic operator propagates absence: `present + absent` is
//! absent, never `present + 0`.

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A reported (or derived) amount that may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, From, Into)]
#[serde(transparent)]
pub struct Amount(Option<f64>);

impl Amount {
    /// The absent amount.
    pub const ABSENT: Self = Self(None);

    /// A present amount. Non-finite inputs are absent.
    pub const fn new(value: f64) -> Self {
        if value.is_finite() { Self(Some(value)) } else { Self(None) }
    }

    /// The underlying value.
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Returns true if a value is present.
    pub const fn is_present(self) -> bool {
        self.0.is_some()
    }

    /// Returns true if no value is present.
    pub const fn is_absent(self) -> bool {
        self.0.is_none()
    }

    /// The value, or zero when absent.
    ///
    /// Only for call sites where a missing component genuinely contributes
    /// nothing (e.g. an unreported short-term debt line).
    pub fn or_zero(self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    /// This amount if present, otherwise `other`.
    pub const fn or(self, other: Self) -> Self {
        if self.0.is_some() { self } else { other }
    }

    /// Apply `f` to a present value.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        self.0.map_or(Self::ABSENT, |v| Self::new(f(v)))
    }

    /// Combine two amounts, absent if either is absent.
    pub fn zip_with(self, other: Self, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self::new(f(a, b)),
            _ => Self::ABSENT,
        }
    }

    /// Returns true if present and strictly negative.
    pub fn is_negative(self) -> bool {
        self.0.is_some_and(|v| v < 0.0)
    }

    /// Present and strictly positive value.
    pub fn positive(self) -> Option<f64> {
        self.0.filter(|v| *v > 0.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("n/a"),
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl Mul<f64> for Amount {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

/// Division by zero yields an absent amount.
impl Div<f64> for Amount {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        if rhs == 0.0 { Self::ABSENT } else { self.map(|v| v / rhs) }
    }
}

/// The sum of an empty iterator is zero; any absent term makes the sum absent.
impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(0.0), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Self> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic_propagates_absence() {
        let a = Amount::new(10.0);
        let none = Amount::ABSENT;

        assert_eq!((a + none), Amount::ABSENT);
        assert_eq!((none - a), Amount::ABSENT);
        assert_eq!(-none, Amount::ABSENT);
        assert_eq!(none * 2.0, Amount::ABSENT);
        assert_relative_eq!((a - Amount::new(4.0)).value().unwrap(), 6.0);
        assert_relative_eq!((a / 4.0).value().unwrap(), 2.5);
    }

    #[test]
    fn test_division_by_zero_is_absent() {
        assert!((Amount::new(1.0) / 0.0).is_absent());
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert!(Amount::new(f64::NAN).is_absent());
        assert!(Amount::new(f64::INFINITY).is_absent());
    }

    #[test]
    fn test_sum() {
        let present = [Amount::new(1.0), Amount::new(2.0), Amount::new(3.0)];
        assert_eq!(present.iter().sum::<Amount>(), Amount::new(6.0));

        let gap = [Amount::new(1.0), Amount::ABSENT];
        assert!(gap.iter().sum::<Amount>().is_absent());
    }

    #[test]
    fn test_or_zero_and_or() {
        assert_eq!(Amount::ABSENT.or_zero(), 0.0);
        assert_eq!(Amount::ABSENT.or(Amount::new(3.0)), Amount::new(3.0));
        assert_eq!(Amount::new(1.0).or(Amount::new(3.0)), Amount::new(1.0));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&[Amount::new(1.5), Amount::ABSENT]).unwrap();
        assert_eq!(json, "[1.5,null]");
        let back: Vec<Amount> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Amount::new(1.5), Amount::ABSENT]);
    }
}
