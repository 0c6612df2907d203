//! Exhaustive search over every subset of the catalog.
//!
//! Subsets are enumerated by size (0, 1, ..., n) and, within a size, in
//! lexicographic index order. Only a strictly greater profit replaces the
//! incumbent, so the first maximum found wins. The optimum profit always
//! equals the DP solver's, the chosen subset may differ on ties.
//!
//! Cost is `O(2^n · n)`; callers bound `n` (see [`solve`](super::solve)).

use itertools::Itertools;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::money::Money;
use crate::solver::{validate_budget, SolveControl, SolveResult};
use crate::types::Algorithm;

/// Subsets examined between two control checks.
const CHECK_INTERVAL: u64 = 4096;

/// Solves the catalog under `budget` (cents) by exhaustive search.
///
/// `state_evaluations` is the number of subsets examined, `2^n` for a
/// catalog of `n` actions.
pub fn solve_bruteforce(catalog: &Catalog, budget: i64) -> CoreResult<SolveResult> {
    solve_bruteforce_with(catalog, budget, &SolveControl::none())
}

/// [`solve_bruteforce`] with a deadline / cancellation check.
pub fn solve_bruteforce_with(
    catalog: &Catalog,
    budget: i64,
    control: &SolveControl,
) -> CoreResult<SolveResult> {
    let started = Instant::now();
    validate_budget(budget)?;
    control.check()?;

    let actions = catalog.as_slice();

    // The empty subset: zero cost, zero profit.
    let mut best_profit: i64 = 0;
    let mut best_subset: Vec<usize> = Vec::new();
    let mut examined: u64 = 1;

    for size in 1..=actions.len() {
        for subset in (0..actions.len()).combinations(size) {
            examined += 1;
            if examined % CHECK_INTERVAL == 0 {
                control.check()?;
            }

            // Catalog totals fit in i64, so no subset sum can overflow.
            let (cost, profit) = subset.iter().fold((0i64, 0i64), |(cost, profit), &i| {
                (
                    cost + actions[i].cost().cents(),
                    profit + actions[i].profit().cents(),
                )
            });

            if cost <= budget && profit > best_profit {
                best_profit = profit;
                best_subset = subset;
            }
        }
    }

    Ok(SolveResult::assemble(
        Algorithm::BruteForce,
        catalog,
        Money::from_cents(budget),
        Money::from_cents(best_profit),
        best_subset,
        examined,
        started,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, InterruptReason};
    use crate::solver::tests::catalog_of;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[test]
    fn test_reference_scenario() {
        let catalog = catalog_of(&[(300, 50), (200, 40), (400, 70), (500, 80), (100, 10)]);
        let result = solve_bruteforce(&catalog, 700).unwrap();

        assert_eq!(result.best_profit.cents(), 120);
        assert_eq!(result.chosen_indices, vec![0, 2]);
        assert_eq!(result.state_evaluations, 32);
        assert_eq!(result.algorithm, Algorithm::BruteForce);
        assert!(result.total_cost().cents() <= 700);
    }

    #[test]
    fn test_empty_catalog() {
        let result = solve_bruteforce(&Catalog::empty(), 1000).unwrap();
        assert!(result.best_profit.is_zero());
        assert!(result.chosen.is_empty());
        assert_eq!(result.state_evaluations, 1);
    }

    #[test]
    fn test_zero_budget() {
        let catalog = catalog_of(&[(100, 10), (50, 5)]);
        let result = solve_bruteforce(&catalog, 0).unwrap();
        assert!(result.best_profit.is_zero());
        assert!(result.chosen_indices.is_empty());
        assert_eq!(result.state_evaluations, 4);
    }

    /// Both singletons tie at 50; the smaller subset index comes first.
    #[test]
    fn test_first_found_wins_on_tie() {
        let catalog = catalog_of(&[(150, 50), (100, 50)]);
        let result = solve_bruteforce(&catalog, 200).unwrap();
        assert_eq!(result.chosen_indices, vec![0]);
        assert_eq!(result.best_profit.cents(), 50);
    }

    #[test]
    fn test_large_profits_stay_exact() {
        let catalog = catalog_of(&[(1, 4_000_000_000_000_000_000), (1, 5_000_000_000_000_000_000)]);
        let result = solve_bruteforce(&catalog, 2).unwrap();
        assert_eq!(result.best_profit.cents(), 9_000_000_000_000_000_000);
        assert_eq!(result.chosen_indices, vec![0, 1]);

        let result = solve_bruteforce(&catalog, i64::MAX).unwrap();
        assert_eq!(result.chosen_indices, vec![0, 1]);
    }

    #[test]
    fn test_cancel_flag_checked_before_search() {
        let catalog = catalog_of(&[(100, 10)]);
        let control = SolveControl::none().with_cancel_flag(Arc::new(AtomicBool::new(true)));
        assert_eq!(
            solve_bruteforce_with(&catalog, 100, &control),
            Err(CoreError::Interrupted(InterruptReason::Cancelled))
        );
    }
}
