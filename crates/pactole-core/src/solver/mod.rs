//! # Solvers
//!
//! Two strategies select the most profitable affordable subset of a
//! [`Catalog`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Solver Layout                                  │
//! │                                                                         │
//! │            ┌──────────────────────────────────────────┐                │
//! │            │  solve(catalog, budget, &SolveOptions)   │                │
//! │            │  Strategy::{Auto, DynamicProgramming,    │                │
//! │            │             BruteForce}                  │                │
//! │            └──────────────┬─────────────┬─────────────┘                │
//! │                           │             │                               │
//! │              ┌────────────▼───┐   ┌─────▼──────────────┐               │
//! │              │  dp.rs         │   │  bruteforce.rs     │               │
//! │              │  O(n · budget) │   │  O(2^n · n)        │               │
//! │              │  production    │   │  oracle / small n  │               │
//! │              └────────────────┘   └────────────────────┘               │
//! │                           │             │                               │
//! │                           ▼             ▼                               │
//! │                        SolveResult (immutable)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both solvers are synchronous and allocate their working state per call.
//! Nothing is shared between invocations.

mod bruteforce;
mod dp;

pub use bruteforce::{solve_bruteforce, solve_bruteforce_with};
pub use dp::{solve_dp, solve_dp_with};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, InterruptReason, ValidationError};
use crate::money::Money;
use crate::types::{Action, Algorithm};
use crate::validation::validate_brute_force_size;

/// Default ceiling on catalog size for brute force through [`solve`].
pub const DEFAULT_BRUTE_FORCE_MAX: usize = 20;

// =============================================================================
// Solve Result
// =============================================================================

/// Output of one solve call.
///
/// `chosen` is a subsequence of the catalog in original order and
/// `chosen_indices` holds the matching catalog positions, ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub algorithm: Algorithm,
    pub budget: Money,
    pub best_profit: Money,
    pub chosen_indices: Vec<usize>,
    pub chosen: Vec<Action>,
    /// DP cell updates attempted, or subsets examined for brute force.
    pub state_evaluations: u64,
    /// Wall-clock time of the call.
    pub elapsed: Duration,
    pub catalog_len: usize,
}

impl SolveResult {
    /// True when both results describe the same selection, ignoring `elapsed`.
    pub fn same_solution(&self, other: &SolveResult) -> bool {
        self.algorithm == other.algorithm
            && self.budget == other.budget
            && self.best_profit == other.best_profit
            && self.chosen_indices == other.chosen_indices
            && self.chosen == other.chosen
            && self.state_evaluations == other.state_evaluations
            && self.catalog_len == other.catalog_len
    }

    /// Total cost of the chosen actions.
    pub fn total_cost(&self) -> Money {
        self.chosen.iter().map(Action::cost).sum()
    }

    pub(crate) fn assemble(
        algorithm: Algorithm,
        catalog: &Catalog,
        budget: Money,
        best_profit: Money,
        chosen_indices: Vec<usize>,
        state_evaluations: u64,
        started: Instant,
    ) -> Self {
        let chosen = chosen_indices
            .iter()
            .filter_map(|&i| catalog.get(i).cloned())
            .collect();

        SolveResult {
            algorithm,
            budget,
            best_profit,
            chosen_indices,
            chosen,
            state_evaluations,
            elapsed: started.elapsed(),
            catalog_len: catalog.len(),
        }
    }
}

// =============================================================================
// Solve Control
// =============================================================================

/// Optional deadline and cancellation flag for a solve call.
///
/// The DP solver checks it once per action (between outer iterations), the
/// brute-force solver every few thousand subsets. When it trips the solve
/// returns `CoreError::Interrupted` and no result.
///
/// ## Example
/// ```rust
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use pactole_core::solver::SolveControl;
///
/// let stop = Arc::new(AtomicBool::new(false));
/// let control = SolveControl::none()
///     .with_timeout(Duration::from_secs(5))
///     .with_cancel_flag(stop.clone());
/// assert!(!control.is_unbounded());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SolveControl {
    /// No deadline, no cancellation.
    pub fn none() -> Self {
        SolveControl::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline to `now + timeout`. A timeout too large to
    /// represent leaves the solve without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Solves stop once `flag` is set to `true` by any thread.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.deadline.is_none() && self.cancel.is_none()
    }

    pub(crate) fn check(&self) -> CoreResult<()> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(CoreError::Interrupted(InterruptReason::Cancelled));
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(CoreError::Interrupted(InterruptReason::DeadlineExceeded));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// Which solver [`solve`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// DP, unless the catalog is within the brute-force ceiling and
    /// exhaustive search is the smaller amount of work.
    #[default]
    Auto,
    #[serde(alias = "dp")]
    DynamicProgramming,
    BruteForce,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Auto => write!(f, "auto"),
            Strategy::DynamicProgramming => write!(f, "dp"),
            Strategy::BruteForce => write!(f, "brute-force"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Strategy::Auto),
            "dp" | "dynamic" | "dynamic-programming" => Ok(Strategy::DynamicProgramming),
            "brute-force" | "bruteforce" | "brute" => Ok(Strategy::BruteForce),
            _ => Err(ValidationError::NotAllowed {
                field: "strategy".to_string(),
                allowed: vec!["auto".into(), "dp".into(), "brute-force".into()],
            }),
        }
    }
}

/// Everything [`solve`] needs besides the catalog and the budget.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub strategy: Strategy,
    pub brute_force_max: usize,
    pub control: SolveControl,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            strategy: Strategy::Auto,
            brute_force_max: DEFAULT_BRUTE_FORCE_MAX,
            control: SolveControl::none(),
        }
    }
}

/// Runs the solver selected by `options.strategy`.
///
/// This is where the exhaustive-search guard lives: the brute-force solver
/// itself never refuses work, so an explicit `BruteForce` request on a
/// catalog above `brute_force_max` fails here with `OutOfRange`.
pub fn solve(catalog: &Catalog, budget: i64, options: &SolveOptions) -> CoreResult<SolveResult> {
    match resolve_algorithm(options.strategy, catalog.len(), budget, options.brute_force_max)? {
        Algorithm::BruteForce => solve_bruteforce_with(catalog, budget, &options.control),
        Algorithm::DynamicProgramming => solve_dp_with(catalog, budget, &options.control),
    }
}

/// Maps a strategy to a concrete algorithm for a catalog of `catalog_len`
/// actions.
pub fn resolve_algorithm(
    strategy: Strategy,
    catalog_len: usize,
    budget: i64,
    brute_force_max: usize,
) -> CoreResult<Algorithm> {
    match strategy {
        Strategy::DynamicProgramming => Ok(Algorithm::DynamicProgramming),
        Strategy::BruteForce => {
            validate_brute_force_size(catalog_len, brute_force_max)?;
            Ok(Algorithm::BruteForce)
        }
        Strategy::Auto => {
            if validate_brute_force_size(catalog_len, brute_force_max).is_err() {
                return Ok(Algorithm::DynamicProgramming);
            }
            // 2^n subsets against n · (budget + 1) cells
            let subsets = 1u128 << catalog_len;
            let cells = catalog_len as u128 * (budget.max(0) as u128 + 1);
            if subsets < cells {
                Ok(Algorithm::BruteForce)
            } else {
                Ok(Algorithm::DynamicProgramming)
            }
        }
    }
}

/// Budget precondition shared by both solvers.
pub(crate) fn validate_budget(budget: i64) -> CoreResult<()> {
    if budget < 0 {
        return Err(CoreError::InvalidBudget(budget));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::strategy::Strategy as PropStrategy;
    use proptest::test_runner::Config as ProptestConfig;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    /// Builds a catalog straight from (cost, profit) pairs in cents.
    pub(crate) fn catalog_of(pairs: &[(i64, i64)]) -> Catalog {
        let actions = pairs.iter().enumerate().map(|(i, &(cost, profit))| {
            Action::new(
                format!("Action-{}", i + 1),
                Money::from_cents(cost),
                Money::from_cents(profit),
            )
            .unwrap()
        });
        Catalog::from_actions(actions).catalog
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("auto".parse::<Strategy>().unwrap(), Strategy::Auto);
        assert_eq!("dp".parse::<Strategy>().unwrap(), Strategy::DynamicProgramming);
        assert_eq!("DP".parse::<Strategy>().unwrap(), Strategy::DynamicProgramming);
        assert_eq!("brute-force".parse::<Strategy>().unwrap(), Strategy::BruteForce);
        assert!("greedy".parse::<Strategy>().is_err());

        for strategy in [Strategy::Auto, Strategy::DynamicProgramming, Strategy::BruteForce] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_resolve_algorithm() {
        // 5 actions, budget 700: 32 subsets vs 3505 cells
        assert_eq!(
            resolve_algorithm(Strategy::Auto, 5, 700, 20).unwrap(),
            Algorithm::BruteForce
        );
        // 20 actions, budget 500.00: 1M subsets vs 1M cells
        assert_eq!(
            resolve_algorithm(Strategy::Auto, 20, 50_000, 20).unwrap(),
            Algorithm::DynamicProgramming
        );
        // Above the ceiling Auto never brute forces
        assert_eq!(
            resolve_algorithm(Strategy::Auto, 21, i64::MAX, 20).unwrap(),
            Algorithm::DynamicProgramming
        );
        assert!(resolve_algorithm(Strategy::BruteForce, 21, 100, 20).is_err());
        assert_eq!(
            resolve_algorithm(Strategy::DynamicProgramming, 3, 0, 20).unwrap(),
            Algorithm::DynamicProgramming
        );
    }

    #[test]
    fn test_solve_dispatch() {
        let catalog = catalog_of(&[(300, 50), (200, 40), (400, 70), (500, 80), (100, 10)]);

        let options = SolveOptions {
            strategy: Strategy::BruteForce,
            ..SolveOptions::default()
        };
        let brute = solve(&catalog, 700, &options).unwrap();
        assert_eq!(brute.algorithm, Algorithm::BruteForce);

        let options = SolveOptions {
            strategy: Strategy::DynamicProgramming,
            ..SolveOptions::default()
        };
        let dp = solve(&catalog, 700, &options).unwrap();
        assert_eq!(dp.algorithm, Algorithm::DynamicProgramming);
        assert_eq!(brute.best_profit, dp.best_profit);

        let options = SolveOptions {
            strategy: Strategy::BruteForce,
            brute_force_max: 4,
            ..SolveOptions::default()
        };
        assert!(matches!(
            solve(&catalog, 700, &options),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_negative_budget_rejected_by_both() {
        let catalog = catalog_of(&[(100, 10)]);
        assert_eq!(solve_dp(&catalog, -1), Err(CoreError::InvalidBudget(-1)));
        assert_eq!(solve_bruteforce(&catalog, -1), Err(CoreError::InvalidBudget(-1)));
    }

    #[test]
    fn test_cancelled_control() {
        let catalog = catalog_of(&[(100, 10), (200, 30)]);
        let flag = Arc::new(AtomicBool::new(true));
        let control = SolveControl::none().with_cancel_flag(flag);

        assert_eq!(
            solve_dp_with(&catalog, 500, &control),
            Err(CoreError::Interrupted(InterruptReason::Cancelled))
        );
        assert_eq!(
            solve_bruteforce_with(&catalog, 500, &control),
            Err(CoreError::Interrupted(InterruptReason::Cancelled))
        );
    }

    #[test]
    fn test_expired_deadline() {
        let catalog = catalog_of(&[(100, 10)]);
        let control = SolveControl::none().with_deadline(Instant::now());
        assert_eq!(
            solve_dp_with(&catalog, 500, &control),
            Err(CoreError::Interrupted(InterruptReason::DeadlineExceeded))
        );
    }

    #[test]
    fn test_unset_flag_does_not_interrupt() {
        let catalog = catalog_of(&[(100, 10)]);
        let control = SolveControl::none()
            .with_cancel_flag(Arc::new(AtomicBool::new(false)))
            .with_timeout(Duration::from_secs(3600));
        assert!(!control.is_unbounded());
        assert!(solve_dp_with(&catalog, 500, &control).is_ok());
        assert!(SolveControl::none().is_unbounded());
    }

    fn small_catalog() -> impl PropStrategy<Value = Vec<(i64, i64)>> {
        prop_vec((1i64..=400, 1i64..=500), 0..=15)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn dp_matches_bruteforce_oracle(pairs in small_catalog(), budget in 0i64..=2000) {
            let catalog = catalog_of(&pairs);
            let dp = solve_dp(&catalog, budget).unwrap();
            let brute = solve_bruteforce(&catalog, budget).unwrap();
            prop_assert_eq!(dp.best_profit, brute.best_profit);
        }

        #[test]
        fn dp_selection_is_feasible_ordered_subsequence(pairs in small_catalog(), budget in 0i64..=2000) {
            let catalog = catalog_of(&pairs);
            let result = solve_dp(&catalog, budget).unwrap();

            prop_assert!(result.chosen_indices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(result.chosen_indices.iter().all(|&i| i < catalog.len()));
            prop_assert!(result.total_cost().cents() <= budget);

            let profit: Money = result.chosen.iter().map(Action::profit).sum();
            prop_assert_eq!(profit, result.best_profit);

            for (action, &index) in result.chosen.iter().zip(&result.chosen_indices) {
                prop_assert_eq!(Some(action), catalog.get(index));
            }
        }

        #[test]
        fn dp_is_idempotent(pairs in small_catalog(), budget in 0i64..=2000) {
            let catalog = catalog_of(&pairs);
            let first = solve_dp(&catalog, budget).unwrap();
            let second = solve_dp(&catalog, budget).unwrap();
            prop_assert!(first.same_solution(&second));
        }
    }
}
