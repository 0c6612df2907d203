//! # Action Catalog
//!
//! The validated, ordered set of actions available to one solve call.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RawAction ─┬─ cost <= 0 or profit <= 0 ──────────► rejected (counted)  │
//! │             │                                                           │
//! │             ├─ NaN / ±inf ────────────────────────► Err(InvalidAmount)  │
//! │             │                                                           │
//! │             └─ normalize ─┬─ rounds to 0 cents ───► rejected (counted)  │
//! │                           │                                             │
//! │                           ├─ totals overflow i64 ─► rejected (counted)  │
//! │                           │                                             │
//! │                           └─ Action ──────────────► Catalog[i]          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering is the validation policy, not a failure: rejected actions are
//! reported back through [`CatalogBuild::rejected`].
//!
//! The summed cost and the summed profit of a catalog each fit in an `i64`,
//! so no subset total computed by a solver can overflow.
//!
//! Input order is preserved. It carries no meaning for the optimum but it
//! fixes the tie-breaking of both solvers.

use serde::Serialize;
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Action, RawAction};

// =============================================================================
// Rejections
// =============================================================================

/// Why an action was left out of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The supplied cost was zero or negative.
    NonPositiveCost,
    /// The supplied profit figure was zero or negative.
    NonPositiveProfit,
    /// The cost rounded to zero minor units.
    ZeroCost,
    /// The profit rounded to zero minor units.
    ZeroProfit,
    /// Adding the action would overflow the catalog's total cost or profit.
    TotalOverflow,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NonPositiveCost => write!(f, "cost is not positive"),
            RejectReason::NonPositiveProfit => write!(f, "profit is not positive"),
            RejectReason::ZeroCost => write!(f, "cost rounds to zero cents"),
            RejectReason::ZeroProfit => write!(f, "profit rounds to zero cents"),
            RejectReason::TotalOverflow => write!(f, "catalog totals would overflow"),
        }
    }
}

/// An action dropped while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedAction {
    pub name: String,
    pub reason: RejectReason,
}

// =============================================================================
// Catalog
// =============================================================================

/// An immutable ordered sequence of actions, indices `0..n-1`.
///
/// Every action in a catalog has a strictly positive cost and profit, and
/// neither total overflows `i64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    actions: Vec<Action>,
}

/// Result of building a catalog: the catalog plus what was filtered out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedAction>,
}

impl CatalogBuild {
    /// Number of input records that did not make it into the catalog.
    pub fn removed(&self) -> usize {
        self.rejected.len()
    }
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Normalizes raw records and filters invalid ones.
    ///
    /// ## Rules
    /// - A non-positive cost or profit figure drops the record
    /// - A cost or profit that rounds to zero cents drops the record
    /// - A non-finite figure or a blank name is an error for the whole build
    ///
    /// ## Example
    /// ```rust
    /// use pactole_core::{Catalog, RawAction};
    ///
    /// let build = Catalog::build(vec![
    ///     RawAction::with_rate("Share-1", 20.0, 5.0),
    ///     RawAction::with_rate("Share-2", 0.0, 10.0),
    ///     RawAction::with_rate("Share-3", 15.0, -2.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(build.catalog.len(), 1);
    /// assert_eq!(build.removed(), 2);
    /// ```
    pub fn build<I>(raw_actions: I) -> CoreResult<CatalogBuild>
    where
        I: IntoIterator<Item = RawAction>,
    {
        let mut builder = Builder::default();

        for raw in raw_actions {
            if let Some(reason) = raw_rejection(&raw) {
                builder.rejected.push(RejectedAction {
                    name: raw.name.trim().to_string(),
                    reason,
                });
                continue;
            }
            builder.admit(raw.normalize()?);
        }

        Ok(builder.finish())
    }

    /// Builds a catalog from already-normalized actions, dropping any
    /// with zero cost or zero profit, or that would overflow the totals.
    pub fn from_actions<I>(actions: I) -> CatalogBuild
    where
        I: IntoIterator<Item = Action>,
    {
        let mut builder = Builder::default();
        for action in actions {
            builder.admit(action);
        }
        builder.finish()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Sum of every action's cost.
    pub fn total_cost(&self) -> Money {
        self.actions.iter().map(Action::cost).sum()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Accumulates kept actions with their running totals.
#[derive(Default)]
struct Builder {
    actions: Vec<Action>,
    rejected: Vec<RejectedAction>,
    total_cost: i64,
    total_profit: i64,
}

impl Builder {
    fn admit(&mut self, action: Action) {
        if let Some(reason) = minor_rejection(&action) {
            self.reject(action, reason);
            return;
        }

        let totals = (
            self.total_cost.checked_add(action.cost().cents()),
            self.total_profit.checked_add(action.profit().cents()),
        );
        match totals {
            (Some(cost), Some(profit)) => {
                self.total_cost = cost;
                self.total_profit = profit;
                self.actions.push(action);
            }
            _ => self.reject(action, RejectReason::TotalOverflow),
        }
    }

    fn reject(&mut self, action: Action, reason: RejectReason) {
        self.rejected.push(RejectedAction {
            name: action.name().to_string(),
            reason,
        });
    }

    fn finish(self) -> CatalogBuild {
        CatalogBuild {
            catalog: Catalog {
                actions: self.actions,
            },
            rejected: self.rejected,
        }
    }
}

/// Sign check on the decimal figures, before normalization.
///
/// NaN compares false here on purpose so the normalizer reports it.
fn raw_rejection(raw: &RawAction) -> Option<RejectReason> {
    if raw.cost <= 0.0 {
        return Some(RejectReason::NonPositiveCost);
    }
    if raw.profit_figure() <= 0.0 {
        return Some(RejectReason::NonPositiveProfit);
    }
    None
}

fn minor_rejection(action: &Action) -> Option<RejectReason> {
    if !action.cost().is_positive() {
        return Some(RejectReason::ZeroCost);
    }
    if !action.profit().is_positive() {
        return Some(RejectReason::ZeroProfit);
    }
    None
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_build_keeps_order() {
        let build = Catalog::build(vec![
            RawAction::with_rate("Share-3", 30.0, 10.0),
            RawAction::with_rate("Share-1", 10.0, 5.0),
            RawAction::with_rate("Share-2", 20.0, 7.5),
        ])
        .unwrap();

        let names: Vec<&str> = build.catalog.iter().map(Action::name).collect();
        assert_eq!(names, vec!["Share-3", "Share-1", "Share-2"]);
        assert_eq!(build.removed(), 0);
        assert_eq!(build.catalog.total_cost().cents(), 6000);
    }

    #[test]
    fn test_build_filters_non_positive() {
        let build = Catalog::build(vec![
            RawAction::with_rate("zero-cost", 0.0, 5.0),
            RawAction::with_rate("negative-cost", -12.5, 5.0),
            RawAction::with_rate("zero-rate", 10.0, 0.0),
            RawAction::with_rate("negative-rate", 10.0, -3.0),
            RawAction::with_amount("negative-amount", 10.0, -1.0),
            RawAction::with_rate("ok", 10.0, 3.0),
        ])
        .unwrap();

        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.catalog.get(0).unwrap().name(), "ok");
        assert_eq!(build.removed(), 5);
        assert_eq!(build.rejected[0].reason, RejectReason::NonPositiveCost);
        assert_eq!(build.rejected[1].reason, RejectReason::NonPositiveCost);
        assert_eq!(build.rejected[2].reason, RejectReason::NonPositiveProfit);
        assert_eq!(build.rejected[3].reason, RejectReason::NonPositiveProfit);
        assert_eq!(build.rejected[4].reason, RejectReason::NonPositiveProfit);
    }

    #[test]
    fn test_build_filters_values_rounding_to_zero() {
        let build = Catalog::build(vec![
            RawAction::with_rate("tiny-cost", 0.004, 50.0),
            // 1.00 at 0.4% = 0.4 cents → 0
            RawAction::with_rate("tiny-profit", 1.0, 0.4),
        ])
        .unwrap();

        assert!(build.catalog.is_empty());
        assert_eq!(build.rejected[0].reason, RejectReason::ZeroCost);
        assert_eq!(build.rejected[1].reason, RejectReason::ZeroProfit);
    }

    #[test]
    fn test_build_propagates_non_finite() {
        let result = Catalog::build(vec![
            RawAction::with_rate("ok", 10.0, 3.0),
            RawAction::with_rate("nan", f64::NAN, 3.0),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidAmount { .. })));

        let result = Catalog::build(vec![RawAction::with_rate("inf", 10.0, f64::INFINITY)]);
        assert!(matches!(result, Err(CoreError::InvalidAmount { .. })));
    }

    #[test]
    fn test_build_propagates_blank_name() {
        let result = Catalog::build(vec![RawAction::with_rate("  ", 10.0, 3.0)]);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_from_actions_filters_zero() {
        let build = Catalog::from_actions(vec![
            Action::new("a", Money::from_cents(100), Money::from_cents(10)).unwrap(),
            Action::new("b", Money::zero(), Money::from_cents(10)).unwrap(),
            Action::new("c", Money::from_cents(100), Money::zero()).unwrap(),
        ]);
        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.removed(), 2);
    }

    #[test]
    fn test_totals_must_fit_i64() {
        let profit = Money::from_cents(5_000_000_000_000_000_000);
        let build = Catalog::from_actions(vec![
            Action::new("first", Money::from_cents(1), profit).unwrap(),
            Action::new("second", Money::from_cents(1), profit).unwrap(),
            Action::new("third", Money::from_cents(1), Money::from_cents(10)).unwrap(),
        ]);

        let names: Vec<&str> = build.catalog.iter().map(Action::name).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert_eq!(build.rejected[0].name, "second");
        assert_eq!(build.rejected[0].reason, RejectReason::TotalOverflow);

        let build = Catalog::from_actions(vec![
            Action::new("big", Money::from_cents(i64::MAX), Money::from_cents(1)).unwrap(),
            Action::new("one-more", Money::from_cents(1), Money::from_cents(1)).unwrap(),
        ]);
        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.catalog.total_cost().cents(), i64::MAX);
        assert_eq!(build.rejected[0].reason, RejectReason::TotalOverflow);
    }

    #[test]
    fn test_build_rejects_overflowing_record() {
        // 5e16 euros at 100% is 5e18 cents of profit per record.
        let build = Catalog::build(vec![
            RawAction::with_rate("a", 5e16, 100.0),
            RawAction::with_rate("b", 5e16, 100.0),
        ])
        .unwrap();
        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.rejected[0].reason, RejectReason::TotalOverflow);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.total_cost().is_zero());
        assert_eq!((&catalog).into_iter().count(), 0);
    }
}
