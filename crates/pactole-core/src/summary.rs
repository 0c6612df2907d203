//! # Result Projector
//!
//! Shapes a [`SolveResult`] into a presentation-ready [`Summary`].
//!
//! Every amount stays in minor units ([`Money`]). Turning cents into
//! "12.34 €" is the report layer's job.

use serde::Serialize;
use std::time::Duration;

use crate::money::Money;
use crate::solver::SolveResult;
use crate::types::{Action, Algorithm};

/// One chosen action in a [`Summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub cost: Money,
    pub profit: Money,
}

impl From<&Action> for SummaryLine {
    fn from(action: &Action) -> Self {
        SummaryLine {
            name: action.name().to_string(),
            cost: action.cost(),
            profit: action.profit(),
        }
    }
}

/// Aggregated view of one solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub algorithm: Algorithm,
    pub budget: Money,
    pub total_cost: Money,
    pub total_profit: Money,
    /// `budget - total_cost`, never negative.
    pub remaining_budget: Money,
    pub item_count: usize,
    /// Chosen actions in catalog order.
    pub items: Vec<SummaryLine>,
    pub catalog_len: usize,
    pub state_evaluations: u64,
    pub elapsed: Duration,
}

/// Builds the summary of a solve.
///
/// ## Example
/// ```rust
/// use pactole_core::{project, solve_dp, Catalog, RawAction};
///
/// let catalog = Catalog::build(vec![
///     RawAction::with_rate("Share-1", 20.0, 5.0),
///     RawAction::with_rate("Share-2", 30.0, 10.0),
/// ])
/// .unwrap()
/// .catalog;
///
/// let summary = project(&solve_dp(&catalog, 4000).unwrap());
/// assert_eq!(summary.item_count, 1);
/// assert_eq!(summary.total_cost.cents(), 3000);
/// assert_eq!(summary.total_profit.cents(), 300);
/// assert_eq!(summary.remaining_budget.cents(), 1000);
/// ```
pub fn project(result: &SolveResult) -> Summary {
    let items: Vec<SummaryLine> = result.chosen.iter().map(SummaryLine::from).collect();
    let total_cost: Money = items.iter().map(|line| line.cost).sum();
    let total_profit: Money = items.iter().map(|line| line.profit).sum();

    Summary {
        algorithm: result.algorithm,
        budget: result.budget,
        total_cost,
        total_profit,
        remaining_budget: result.budget - total_cost,
        item_count: items.len(),
        items,
        catalog_len: result.catalog_len,
        state_evaluations: result.state_evaluations,
        elapsed: result.elapsed,
    }
}

impl From<&SolveResult> for Summary {
    fn from(result: &SolveResult) -> Self {
        project(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::tests::catalog_of;
    use crate::solver::{solve_bruteforce, solve_dp};

    #[test]
    fn test_project_reference_scenario() {
        let catalog = catalog_of(&[(300, 50), (200, 40), (400, 70), (500, 80), (100, 10)]);
        let result = solve_dp(&catalog, 700).unwrap();
        let summary = project(&result);

        assert_eq!(summary.algorithm, Algorithm::DynamicProgramming);
        assert_eq!(summary.budget.cents(), 700);
        assert_eq!(summary.total_cost.cents(), 700);
        assert_eq!(summary.total_profit, result.best_profit);
        assert!(summary.remaining_budget.is_zero());
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.catalog_len, 5);
        assert_eq!(summary.state_evaluations, result.state_evaluations);
        assert_eq!(
            summary.items,
            vec![
                SummaryLine {
                    name: "Action-1".to_string(),
                    cost: Money::from_cents(300),
                    profit: Money::from_cents(50),
                },
                SummaryLine {
                    name: "Action-3".to_string(),
                    cost: Money::from_cents(400),
                    profit: Money::from_cents(70),
                },
            ]
        );
    }

    #[test]
    fn test_project_empty_selection() {
        let result = solve_bruteforce(&Catalog::empty(), 1000).unwrap();
        let summary = Summary::from(&result);

        assert_eq!(summary.item_count, 0);
        assert!(summary.items.is_empty());
        assert!(summary.total_cost.is_zero());
        assert!(summary.total_profit.is_zero());
        assert_eq!(summary.remaining_budget.cents(), 1000);
        assert_eq!(summary.algorithm, Algorithm::BruteForce);
    }

    #[test]
    fn test_summary_serializes_minor_units() {
        let catalog = catalog_of(&[(250, 30)]);
        let summary = project(&solve_dp(&catalog, 300).unwrap());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["total_cost"], 250);
        assert_eq!(json["total_profit"], 30);
        assert_eq!(json["remaining_budget"], 50);
        assert_eq!(json["algorithm"], "dynamic_programming");
        assert_eq!(json["items"][0]["name"], "Action-1");
    }
}
