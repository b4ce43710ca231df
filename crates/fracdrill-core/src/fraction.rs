//! Exact rational arithmetic on signed 64-bit fractions.
//!
//! A [`Fraction`] always has a nonzero denominator. Values produced by the
//! arithmetic functions in this module are in lowest terms with the sign
//! carried by the numerator. Fractions drawn for a problem may be unreduced
//! (e.g. `4/2`); [`equals`] compares by value, not by representation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_integer::Integer;
use num_rational::{Ratio, Rational64};
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub};
use serde::{Deserialize, Serialize};

use crate::error::{FractionError, Result};

/// A signed rational number `numerator / denominator`.
///
/// The parts are kept exactly as given, so `PartialEq` is structural:
/// `2/4 != 1/2`. Use [`equals`] for equivalence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction(Rational64);

#[derive(Serialize, Deserialize)]
struct RawFraction {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = FractionError;

    fn try_from(raw: RawFraction) -> Result<Self> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

impl From<Fraction> for RawFraction {
    fn from(fraction: Fraction) -> Self {
        Self {
            numerator: fraction.numerator(),
            denominator: fraction.denominator(),
        }
    }
}

impl Fraction {
    /// Construct a fraction without reducing it.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(FractionError::InvalidDenominator);
        }
        Ok(Self(Ratio::new_raw(numerator, denominator)))
    }

    /// The whole number `n/1`.
    pub fn integer(n: i64) -> Self {
        Self(Rational64::from_integer(n))
    }

    pub fn numerator(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denominator(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.numerator() == 0
    }

    /// This value in lowest terms with a positive denominator.
    pub fn reduced(&self) -> Result<Self> {
        reduce(self.numerator(), self.denominator())
    }

    /// Approximate value, for display and heuristics only.
    pub fn to_f64(&self) -> f64 {
        self.numerator() as f64 / self.denominator() as f64
    }

    /// Compare two fractions by value.
    pub fn cmp_value(&self, other: &Fraction) -> Ordering {
        self.widen().cmp(&other.widen())
    }

    /// The same fraction with a different denominator, numerator untouched.
    pub(crate) fn with_denominator(&self, denominator: i64) -> Result<Self> {
        Fraction::new(self.numerator(), denominator)
    }

    /// Lowest-terms value in `i128`, where no `i64` input can overflow.
    fn widen(&self) -> Ratio<i128> {
        Ratio::new(
            i128::from(self.numerator()),
            i128::from(self.denominator()),
        )
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.numerator() == other.numerator() && self.denominator() == other.denominator()
    }
}

impl Eq for Fraction {}

impl Hash for Fraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numerator().hash(state);
        self.denominator().hash(state);
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Accepts `n/d`, `n d`, or a bare integer `n`.
    fn from_str(s: &str) -> Result<Self> {
        let (numerator, denominator) = split_parts(s)?;
        Fraction::new(numerator, denominator)
    }
}

/// Split user text into integer numerator and denominator parts.
///
/// The denominator is returned as written, so a zero survives for the
/// caller to reject with its own message.
pub(crate) fn split_parts(s: &str) -> Result<(i64, i64)> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(FractionError::InvalidUserInput(
            "Please enter valid numbers".into(),
        ));
    }

    let (num_str, den_str) = match trimmed.split_once('/') {
        Some((n, d)) => (n.trim(), Some(d.trim())),
        None => {
            let mut parts = trimmed.split_whitespace();
            let n = parts.next().unwrap_or_default();
            let d = parts.next();
            if parts.next().is_some() {
                return Err(FractionError::InvalidUserInput(format!(
                    "expected a fraction like 3/4, got '{trimmed}'"
                )));
            }
            (n, d)
        }
    };

    let parse = |part: &str| {
        part.parse::<i64>().map_err(|_| {
            FractionError::InvalidUserInput(format!("'{part}' is not a whole number"))
        })
    };

    let numerator = parse(num_str)?;
    let denominator = match den_str {
        Some(d) => parse(d)?,
        None => 1,
    };
    Ok((numerator, denominator))
}

/// Bring a lowest-terms `i128` result back to `i64` parts.
fn narrow(value: Ratio<i128>) -> Result<Fraction> {
    let numerator = i64::try_from(*value.numer()).map_err(|_| FractionError::Overflow)?;
    let denominator = i64::try_from(*value.denom()).map_err(|_| FractionError::Overflow)?;
    Fraction::new(numerator, denominator)
}

/// Reduce `numerator / denominator` to lowest terms.
///
/// The sign is moved onto the numerator so equal values always share one
/// representation. Zero reduces to `0/1`.
pub fn reduce(numerator: i64, denominator: i64) -> Result<Fraction> {
    if denominator == 0 {
        return Err(FractionError::InvalidDenominator);
    }
    let numerator = i128::from(numerator);
    let denominator = i128::from(denominator);
    let g = numerator.gcd(&denominator) * denominator.signum();
    narrow(Ratio::new_raw(numerator / g, denominator / g))
}

fn checked(
    a: &Fraction,
    b: &Fraction,
    op: impl FnOnce(&Ratio<i128>, &Ratio<i128>) -> Option<Ratio<i128>>,
) -> Result<Fraction> {
    op(&a.widen(), &b.widen())
        .ok_or(FractionError::Overflow)
        .and_then(narrow)
}

pub fn add(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    checked(a, b, |x, y| x.checked_add(y))
}

pub fn subtract(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    checked(a, b, |x, y| x.checked_sub(y))
}

pub fn multiply(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    checked(a, b, |x, y| x.checked_mul(y))
}

/// `a ÷ b`. Fails with [`FractionError::DivisionByZero`] when `b` is zero-valued.
pub fn divide(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    if b.is_zero() {
        return Err(FractionError::DivisionByZero);
    }
    checked(a, b, |x, y| x.checked_div(y))
}

/// Value equivalence, independent of representation.
///
/// Never fails: values whose lowest terms leave the `i64` range (such as
/// `i64::MIN / -1`) are still compared exactly.
pub fn equals(a: &Fraction, b: &Fraction) -> bool {
    a.cmp_value(b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn sample() -> Vec<Fraction> {
        let mut out = Vec::new();
        for n in -6..=6 {
            for d in [-4, -3, -1, 1, 2, 3, 5, 6] {
                out.push(f(n, d));
            }
        }
        out
    }

    #[test]
    fn add_halves_and_thirds() {
        assert_eq!(add(&f(1, 2), &f(1, 3)).unwrap(), f(5, 6));
    }

    #[test]
    fn reduce_lowest_terms() {
        for n in -30..=30 {
            for d in (-30..=30).filter(|d| *d != 0) {
                let r = reduce(n, d).unwrap();
                assert_eq!(
                    r.numerator().gcd(&r.denominator()),
                    1,
                    "{n}/{d} reduced to {r}"
                );
                assert!(r.denominator() > 0);
            }
        }
    }

    #[test]
    fn reduce_normalizes_sign() {
        assert_eq!(reduce(3, -6).unwrap(), f(-1, 2));
        assert_eq!(reduce(-3, -6).unwrap(), f(1, 2));
        assert_eq!(reduce(0, -5).unwrap(), f(0, 1));
    }

    #[test]
    fn reduce_handles_i64_extremes() {
        assert_eq!(reduce(0, i64::MIN).unwrap(), f(0, 1));
        assert_eq!(reduce(i64::MIN, i64::MIN).unwrap(), f(1, 1));
        assert_eq!(reduce(i64::MIN, 2).unwrap(), f(i64::MIN / 2, 1));
        assert_eq!(reduce(1, i64::MIN), Err(FractionError::Overflow));
        assert_eq!(reduce(i64::MIN, -1), Err(FractionError::Overflow));
    }

    #[test]
    fn reduce_zero_denominator_fails() {
        assert_eq!(reduce(3, 0), Err(FractionError::InvalidDenominator));
        assert_eq!(Fraction::new(1, 0), Err(FractionError::InvalidDenominator));
    }

    #[test]
    fn divide_by_zero_value_fails() {
        assert_eq!(
            divide(&f(1, 2), &f(0, 7)),
            Err(FractionError::DivisionByZero)
        );
    }

    #[test]
    fn multiply_divide_round_trip() {
        for a in sample() {
            for b in sample().into_iter().filter(|b| !b.is_zero()) {
                let back = divide(&multiply(&a, &b).unwrap(), &b).unwrap();
                assert!(equals(&back, &a), "({a} * {b}) / {b} = {back}");
            }
        }
    }

    #[test]
    fn add_and_multiply_commute() {
        for a in sample() {
            for b in sample() {
                assert_eq!(add(&a, &b).unwrap(), add(&b, &a).unwrap());
                assert_eq!(multiply(&a, &b).unwrap(), multiply(&b, &a).unwrap());
            }
        }
    }

    #[test]
    fn subtract_swapped_is_negative() {
        let minus_one = Fraction::integer(-1);
        for a in sample() {
            for b in sample() {
                let ab = subtract(&a, &b).unwrap();
                let ba = subtract(&b, &a).unwrap();
                assert!(equals(&ab, &multiply(&ba, &minus_one).unwrap()));
            }
        }
    }

    #[test]
    fn divide_swapped_is_reciprocal() {
        let one = Fraction::integer(1);
        for a in sample().into_iter().filter(|a| !a.is_zero()) {
            for b in sample().into_iter().filter(|b| !b.is_zero()) {
                let ab = divide(&a, &b).unwrap();
                let ba = divide(&b, &a).unwrap();
                assert!(equals(&multiply(&ab, &ba).unwrap(), &one));
            }
        }
    }

    #[test]
    fn equals_ignores_representation() {
        assert!(equals(&f(2, 4), &f(1, 2)));
        assert!(equals(&f(1, -2), &f(-1, 2)));
        assert!(equals(&f(-3, -9), &f(1, 3)));
        assert!(!equals(&f(1, 2), &f(1, 3)));
        assert!(!equals(&f(1, 2), &f(-1, 2)));
    }

    #[test]
    fn equals_at_i64_extremes() {
        assert!(equals(&f(i64::MIN, i64::MIN), &f(1, 1)));
        assert!(equals(&f(0, i64::MIN), &f(0, 1)));
        assert!(equals(&f(i64::MIN, -1), &f(i64::MIN, -1)));
        assert!(!equals(&f(i64::MIN, -1), &f(i64::MAX, 1)));
        assert!(!equals(&f(1, i64::MIN), &f(1, i64::MAX)));
    }

    #[test]
    fn cmp_value_handles_signs() {
        assert_eq!(f(1, 2).cmp_value(&f(1, 3)), Ordering::Greater);
        assert_eq!(f(1, -2).cmp_value(&f(1, 3)), Ordering::Less);
        assert_eq!(f(-1, -2).cmp_value(&f(2, 4)), Ordering::Equal);
        assert_eq!(f(7, 3).cmp_value(&f(9, 4)), Ordering::Greater);
    }

    #[test]
    fn overflow_is_reported() {
        let big = Fraction::integer(i64::MAX);
        assert_eq!(multiply(&big, &big), Err(FractionError::Overflow));
        assert_eq!(add(&big, &big), Err(FractionError::Overflow));
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("3/4".parse::<Fraction>().unwrap(), f(3, 4));
        assert_eq!(" -3 / 4 ".parse::<Fraction>().unwrap(), f(-3, 4));
        assert_eq!("3 4".parse::<Fraction>().unwrap(), f(3, 4));
        assert_eq!("5".parse::<Fraction>().unwrap(), f(5, 1));
        assert!("1/0".parse::<Fraction>().is_err());
        assert!("a/b".parse::<Fraction>().unwrap_err().is_user_error());
        assert!("1 2 3".parse::<Fraction>().is_err());
        assert_eq!(f(-5, 6).to_string(), "-5/6");
    }

    #[test]
    fn serde_rejects_zero_denominator() {
        let ok: Fraction = serde_json::from_str(r#"{"numerator":2,"denominator":4}"#).unwrap();
        assert_eq!(ok, f(2, 4));
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"numerator":2,"denominator":4}"#
        );
        let bad = serde_json::from_str::<Fraction>(r#"{"numerator":2,"denominator":0}"#);
        assert!(bad.is_err());
    }
}
