//! # Money Module
//!
//! Provides the `Money` type and the normalizer that turns externally
//! supplied decimals into integer minor units.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float profits across thousands of DP cells:                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ equality checks break            │
//! │                                                                         │
//! │  Indexing a DP table by a float cost:                                   │
//! │    dp[20.50]  ❌ impossible                                              │
//! │                                                                         │
//! │  OUR SOLUTION: Convert ONCE, at the edge                                │
//! │    20.50 € → 2050 cents, 5% of 2050 cents → 103 cents (102.5, even)     │
//! │    Everything downstream is exact integer arithmetic                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pactole_core::money::{profit_from_rate, to_minor_units, Money};
//!
//! let cost = to_minor_units(20.50).unwrap();
//! assert_eq!(cost, Money::from_cents(2050));
//!
//! let profit = profit_from_rate(cost, 5.0).unwrap();
//! assert_eq!(profit.cents(), 102); // 102.5 rounds half to even
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use crate::error::{AmountIssue, CoreError, CoreResult};

/// Minor units per major unit (cents per euro).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as remaining budget can be computed
///   without casts; catalog inputs are still required to be non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a bare integer of cents
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  RawAction.cost (f64) ──► to_minor_units ──► Action.cost ──► DP index   │
/// │                                                                         │
/// │  RawAction rate (f64) ──► profit_from_rate ──► Action.profit ──► DP sum │
/// │                                                                         │
/// │  Summary.total_cost / total_profit ──► presentation divides by 100      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pactole_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion.
    ///
    /// ## Example
    /// ```rust
    /// use pactole_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Normalizer
// =============================================================================

/// Converts a decimal amount in major units into minor units.
///
/// Rounds `amount * 100` half to even (Bankers Rounding):
/// ```text
///   12.344  → 1234.4 → 1234
///   0.125   → 12.5   → 12    (tie, 12 is even)
///   0.375   → 37.5   → 38    (tie, 38 is even)
/// ```
///
/// ## Errors
/// `InvalidAmount` when the amount is negative, NaN/±infinity, or does not
/// fit in an `i64` once scaled.
pub fn to_minor_units(amount: f64) -> CoreResult<Money> {
    scale_to_minor("amount", amount, MINOR_PER_MAJOR as f64)
}

/// Computes the absolute profit of an action from its cost and a
/// percentage rate: `round(cost_minor * rate_percent / 100)`.
///
/// ## Example
/// ```rust
/// use pactole_core::money::{profit_from_rate, Money};
///
/// // 8.25% of 10.00 = 0.825 → 82.5 cents → 82 (half to even)
/// let profit = profit_from_rate(Money::from_cents(1000), 8.25).unwrap();
/// assert_eq!(profit.cents(), 82);
/// ```
///
/// ## Errors
/// `InvalidAmount` for a negative cost, or a rate that is negative or not
/// finite, or a product too large for `i64`.
pub fn profit_from_rate(cost: Money, rate_percent: f64) -> CoreResult<Money> {
    if cost.is_negative() {
        return Err(CoreError::invalid_amount(
            "cost",
            cost.cents() as f64,
            AmountIssue::Negative,
        ));
    }
    check_decimal("profit rate", rate_percent)?;

    let raw = cost.cents() as f64 * rate_percent / 100.0;
    from_scaled("profit rate", rate_percent, raw)
}

/// Multiplies `value` by `factor` and rounds it into `Money`.
fn scale_to_minor(field: &str, value: f64, factor: f64) -> CoreResult<Money> {
    check_decimal(field, value)?;
    from_scaled(field, value, value * factor)
}

fn check_decimal(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(CoreError::invalid_amount(field, value, AmountIssue::NotFinite));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_amount(field, value, AmountIssue::Negative));
    }
    Ok(())
}

fn from_scaled(field: &str, value: f64, scaled: f64) -> CoreResult<Money> {
    let rounded = scaled.round_ties_even();
    // `i64::MAX as f64` is 2^63, which itself does not fit.
    if !rounded.is_finite() || rounded >= i64::MAX as f64 {
        return Err(CoreError::invalid_amount(field, value, AmountIssue::OutOfRange));
    }
    Ok(Money(rounded as i64))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in major units with two decimals, no currency sign.
///
/// ## Note
/// This is for debugging and logs. Report rendering lives in the CLI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_to_minor_units_basic() {
        assert_eq!(to_minor_units(20.0).unwrap().cents(), 2000);
        assert_eq!(to_minor_units(20.5).unwrap().cents(), 2050);
        assert_eq!(to_minor_units(0.0).unwrap().cents(), 0);
        assert_eq!(to_minor_units(12.344).unwrap().cents(), 1234);
        assert_eq!(to_minor_units(12.346).unwrap().cents(), 1235);
    }

    /// 0.125 and 0.375 are exact in binary, so these are true ties.
    #[test]
    fn test_to_minor_units_rounds_half_to_even() {
        assert_eq!(to_minor_units(0.125).unwrap().cents(), 12);
        assert_eq!(to_minor_units(0.375).unwrap().cents(), 38);
        assert_eq!(to_minor_units(0.005).unwrap().cents(), 0);
    }

    #[test]
    fn test_to_minor_units_rejects_bad_input() {
        assert!(matches!(
            to_minor_units(-0.01),
            Err(CoreError::InvalidAmount { reason: AmountIssue::Negative, .. })
        ));
        assert!(matches!(
            to_minor_units(f64::NAN),
            Err(CoreError::InvalidAmount { reason: AmountIssue::NotFinite, .. })
        ));
        assert!(matches!(
            to_minor_units(f64::INFINITY),
            Err(CoreError::InvalidAmount { reason: AmountIssue::NotFinite, .. })
        ));
        assert!(matches!(
            to_minor_units(f64::NEG_INFINITY),
            Err(CoreError::InvalidAmount { reason: AmountIssue::NotFinite, .. })
        ));
        assert!(matches!(
            to_minor_units(1e300),
            Err(CoreError::InvalidAmount { reason: AmountIssue::OutOfRange, .. })
        ));
    }

    #[test]
    fn test_profit_from_rate() {
        // 20.00 at 5% = 1.00
        let profit = profit_from_rate(Money::from_cents(2000), 5.0).unwrap();
        assert_eq!(profit.cents(), 100);

        // 10.00 at 8.25% = 82.5 cents, tie goes to the even neighbour
        let profit = profit_from_rate(Money::from_cents(1000), 8.25).unwrap();
        assert_eq!(profit.cents(), 82);

        // 10.00 at 8.35% = 83.5 cents → 84
        let profit = profit_from_rate(Money::from_cents(1000), 8.35).unwrap();
        assert_eq!(profit.cents(), 84);

        let profit = profit_from_rate(Money::from_cents(1000), 0.0).unwrap();
        assert!(profit.is_zero());
    }

    #[test]
    fn test_profit_from_rate_rejects_bad_input() {
        assert!(profit_from_rate(Money::from_cents(1000), -1.0).is_err());
        assert!(profit_from_rate(Money::from_cents(1000), f64::NAN).is_err());
        assert!(profit_from_rate(Money::from_cents(-1000), 5.0).is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert_eq!(Money::default(), zero);

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
