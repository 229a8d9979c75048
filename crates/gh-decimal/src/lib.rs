//! Exact decimal arithmetic for prices, PnL, and thresholds.
//!
//! # Motivation
//!
//! Comparing and accumulating prices in binary floating point drifts:
//! `0.1 + 0.2 != 0.3` in `f64`, and repeated tick-by-tick accumulation of
//! such errors eventually flips a `>=` comparison that should never flip.
//! A grid-hedging engine crosses price levels thousands of times per run;
//! a single misfired comparison either fires a phantom trade or misses a
//! real one.
//!
//! `Decimal` wraps [`rust_decimal::Decimal`] (28-29 significant digits,
//! base-10 scaled integer representation) behind a newtype so construction
//! is always explicit — there is no `From<f64>` impl, since an `f64`
//! literal is already lossy before it reaches us. Construction from an
//! integer or a decimal-formatted string is exact.
//!
//! # Precision
//!
//! `rust_decimal::Decimal` carries up to 28-29 significant digits, well
//! past the >=12 digit floor required for monetary comparisons. Rounding
//! (where it occurs at all, e.g. `to_f64_lossy`) is the underlying type's
//! standard round-half-even, applied once at the boundary — never
//! mid-computation.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::Decimal as Inner;
use serde::{Deserialize, Serialize};

/// An exact signed decimal value.
///
/// # Construction
///
/// Use [`Decimal::from_i64`] or [`Decimal::parse_str`] for explicit
/// construction. There is intentionally no `From<f64>` implementation —
/// an `f64` is already an approximation of whatever the caller meant, and
/// silently accepting one here would smuggle binary-float drift into
/// exact arithmetic.
///
/// # Reporting
///
/// Use [`Decimal::to_f64_lossy`] only when producing a human-facing
/// report or a chart; never for comparisons or further arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(Inner);

/// Error constructing a [`Decimal`] from a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDecimalError(pub String);

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse decimal from {:?}", self.0)
    }
}

impl std::error::Error for ParseDecimalError {}

impl Decimal {
    /// Zero.
    pub const ZERO: Decimal = Decimal(Inner::ZERO);

    /// Construct from a signed integer. Exact.
    #[inline]
    pub fn from_i64(v: i64) -> Self {
        Decimal(Inner::from(v))
    }

    /// Parse a decimal-formatted string (e.g. `"10.05"`, `"-0.30"`). Exact —
    /// no intermediate binary-float representation.
    pub fn parse_str(s: &str) -> Result<Self, ParseDecimalError> {
        Inner::from_str(s.trim())
            .map(Decimal)
            .map_err(|_| ParseDecimalError(s.to_string()))
    }

    /// Lossy conversion to `f64`, for reporting only (charts, human-facing
    /// summaries). Never use the result for a comparison or for further
    /// arithmetic that feeds back into the engine.
    pub fn to_f64_lossy(self) -> f64 {
        self.0.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// `true` if this value is strictly positive.
    pub fn is_positive(self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// `true` if this value is zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Decimal(self.0.abs())
    }

    /// Divide by a nonzero integer quantity. Returns `None` if `qty == 0`.
    pub fn checked_div_i64(self, qty: i64) -> Option<Self> {
        if qty == 0 {
            None
        } else {
            Some(Decimal(self.0 / Inner::from(qty)))
        }
    }

    /// Multiply by an integer share count.
    pub fn mul_i64(self, qty: i64) -> Self {
        Decimal(self.0 * Inner::from(qty))
    }
}

// ---------------------------------------------------------------------------
// Arithmetic, closed over Decimal
// ---------------------------------------------------------------------------

impl Add for Decimal {
    type Output = Decimal;
    #[inline]
    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl Sub for Decimal {
    type Output = Decimal;
    #[inline]
    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl Mul for Decimal {
    type Output = Decimal;
    #[inline]
    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

/// Division by a nonzero `Decimal`. Panics on division by zero, matching
/// `rust_decimal`'s own panic-on-divide-by-zero contract; callers dividing
/// by a value that may be zero at runtime should check first or use
/// [`Decimal::checked_div_i64`] for the integer-divisor case.
impl Div for Decimal {
    type Output = Decimal;
    #[inline]
    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl Neg for Decimal {
    type Output = Decimal;
    #[inline]
    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl AddAssign for Decimal {
    #[inline]
    fn add_assign(&mut self, rhs: Decimal) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Decimal {
    #[inline]
    fn sub_assign(&mut self, rhs: Decimal) {
        self.0 -= rhs.0;
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Decimal {
    type Error = ParseDecimalError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Decimal::parse_str(&s)
    }
}

impl From<Decimal> for String {
    fn from(d: Decimal) -> String {
        d.to_string()
    }
}

/// Convenience macro for literal decimals in tests and call sites, modeled
/// on `rust_decimal_macros::dec!` but resolved at runtime (no proc-macro
/// dependency): `decimal!("10.05")`.
#[macro_export]
macro_rules! decimal {
    ($s:expr) => {
        $crate::Decimal::parse_str($s).expect("invalid decimal literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        let d = Decimal::parse_str("10.05").unwrap();
        assert_eq!(d.to_string(), "10.05");
    }

    #[test]
    fn addition_is_exact_where_f64_would_drift() {
        let a = decimal!("0.1");
        let b = decimal!("0.2");
        assert_eq!(a + b, decimal!("0.3"));
    }

    #[test]
    fn division_by_integer_quantity_is_exact() {
        let total = decimal!("1.00");
        let per_share = total.checked_div_i64(3).unwrap();
        // Decimal division carries far more digits than binary f64 would;
        // the repeating-3 expansion starts identically either way.
        assert!(per_share.to_string().starts_with("0.333333333333"));
    }

    #[test]
    fn division_by_zero_quantity_returns_none() {
        let total = decimal!("1.00");
        assert_eq!(total.checked_div_i64(0), None);
    }

    #[test]
    fn ordering_is_total() {
        let a = decimal!("9.99");
        let b = decimal!("10.00");
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn abs_of_negative() {
        assert_eq!(decimal!("-5.25").abs(), decimal!("5.25"));
    }

    #[test]
    fn is_positive_and_is_zero() {
        assert!(decimal!("0.01").is_positive());
        assert!(!decimal!("0").is_positive());
        assert!(decimal!("0").is_zero());
        assert!(!decimal!("-0.01").is_zero());
    }

    #[test]
    fn mul_i64_scales_exactly() {
        let price = decimal!("10.05");
        assert_eq!(price.mul_i64(100), decimal!("1005.00"));
    }

    #[test]
    fn from_i64_is_exact() {
        assert_eq!(Decimal::from_i64(12), decimal!("12"));
    }

    #[test]
    fn parse_invalid_string_errors() {
        assert!(Decimal::parse_str("not-a-number").is_err());
    }

    #[test]
    fn to_f64_lossy_is_approximately_correct() {
        let d = decimal!("1.5");
        assert!((d.to_f64_lossy() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn serde_roundtrip_via_string() {
        let d = decimal!("10.05");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"10.05\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
