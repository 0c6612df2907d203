//! # Domain Types
//!
//! Core domain types used throughout Pactole.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   normalize   ┌─────────────────┐                 │
//! │  │   RawAction     │ ────────────► │     Action      │                 │
//! │  │  ─────────────  │               │  ─────────────  │                 │
//! │  │  name           │               │  name           │                 │
//! │  │  cost (f64)     │               │  cost (Money)   │                 │
//! │  │  profit (enum)  │               │  profit (Money) │                 │
//! │  └─────────────────┘               └─────────────────┘                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   ProfitSpec    │   │   Algorithm     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Rate(%)        │   │  BruteForce     │                             │
//! │  │  Amount(major)  │   │  DynamicProg.   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::money::{profit_from_rate, to_minor_units, Money};
use crate::validation::{validate_action_name, validate_non_negative};

// =============================================================================
// Action
// =============================================================================

/// A candidate investment with a fixed cost and a fixed absolute profit
/// realized after the horizon, both in minor units.
///
/// Immutable once constructed: fields are private and there are no setters.
/// Serialize-only, so the rules in [`Action::new`] cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Action {
    name: String,
    cost: Money,
    profit: Money,
}

impl Action {
    /// Creates an action from already-normalized amounts.
    ///
    /// ## Rules
    /// - Name must not be blank
    /// - Cost and profit must be non-negative
    ///
    /// Zero cost or zero profit is accepted here; the catalog filters
    /// such actions out before any solver sees them.
    pub fn new(name: impl Into<String>, cost: Money, profit: Money) -> CoreResult<Self> {
        let name = name.into();
        validate_action_name(&name)?;
        validate_non_negative("cost", cost)?;
        validate_non_negative("profit", profit)?;
        Ok(Action { name, cost, profit })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn cost(&self) -> Money {
        self.cost
    }

    #[inline]
    pub fn profit(&self) -> Money {
        self.profit
    }
}

// =============================================================================
// Raw Action
// =============================================================================

/// How the profit of a raw record is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ProfitSpec {
    /// Percentage of the cost earned after the horizon (5.0 = 5%).
    Rate(f64),
    /// Absolute profit in major units.
    Amount(f64),
}

/// An externally supplied record, still in decimal major units.
///
/// Produced by whatever loader sits in front of the core (CSV, database,
/// in-memory list) and consumed by [`Catalog::build`](crate::Catalog::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    pub name: String,
    /// Cost in major units (euros).
    pub cost: f64,
    pub profit: ProfitSpec,
}

impl RawAction {
    /// Creates a raw action whose profit is a percentage of its cost.
    pub fn with_rate(name: impl Into<String>, cost: f64, rate_percent: f64) -> Self {
        RawAction {
            name: name.into(),
            cost,
            profit: ProfitSpec::Rate(rate_percent),
        }
    }

    /// Creates a raw action with an absolute profit amount.
    pub fn with_amount(name: impl Into<String>, cost: f64, profit: f64) -> Self {
        RawAction {
            name: name.into(),
            cost,
            profit: ProfitSpec::Amount(profit),
        }
    }

    /// Returns the raw profit figure regardless of how it is expressed.
    pub fn profit_figure(&self) -> f64 {
        match self.profit {
            ProfitSpec::Rate(rate) => rate,
            ProfitSpec::Amount(amount) => amount,
        }
    }

    /// Normalizes this record into an [`Action`] in minor units.
    ///
    /// ## Errors
    /// - `InvalidAmount` for negative or non-finite cost/profit figures
    /// - `Validation` for a blank name
    pub fn normalize(&self) -> CoreResult<Action> {
        let cost = to_minor_units(self.cost)?;
        let profit = match self.profit {
            ProfitSpec::Rate(rate) => profit_from_rate(cost, rate)?,
            ProfitSpec::Amount(amount) => to_minor_units(amount)?,
        };
        Action::new(self.name.trim(), cost, profit)
    }
}

// =============================================================================
// Algorithm
// =============================================================================

/// Which solver produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Exhaustive subset enumeration.
    BruteForce,
    /// Bounded-budget 0/1 knapsack DP.
    DynamicProgramming,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::BruteForce => write!(f, "brute force"),
            Algorithm::DynamicProgramming => write!(f, "dynamic programming"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
