//! # DP Knapsack Solver
//!
//! Exact 0/1 knapsack over integer cents in `O(n · budget)` time.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  best[c]       c = 0..=cap        max profit of a subset costing <= c   │
//! │                (one row, i64, rewritten in place per action)            │
//! │                                                                         │
//! │  taken[i][c]   one bit per (action, capacity)                           │
//! │                set when action i improved best[c] during its own pass   │
//! │                                                                         │
//! │  Pass for action i (cost w, profit v), capacities strictly descending: │
//! │                                                                         │
//! │     c = cap ──► cap-1 ──► ... ──► w                                     │
//! │     best[c - w] is read before it is written in this pass, so it still  │
//! │     holds the value for actions 0..i-1 and action i is used at most once│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capacity
//! `cap = min(budget, Σ cost of the actions costing <= budget)`. No subset
//! of affordable actions costs more than that sum, so `best[c]` is constant
//! for every `c >= cap` and the cheapest maximum is always found at or below
//! it. A budget of `i64::MAX` over a small catalog allocates a small table.
//!
//! ## Reconstruction
//! After pass `i`, `best_i[c]` equals `best_{i-1}[c - w_i] + v_i` when
//! `taken[i][c]` is set and `best_{i-1}[c]` otherwise. Walking actions from
//! `n-1` down to `0` and subtracting `w_i` on every set bit therefore
//! replays the recurrence backwards and yields a subset whose profit is
//! exactly `best[c*]`. Each action is visited once, in strictly descending
//! order, so the walk can neither revisit an index nor loop.
//!
//! A single "last action / previous capacity" pointer per capacity is not
//! enough: a later pass can overwrite `best[c - w]` without touching
//! `best[c]`, and the pointer chain then mixes two different subsets.
//!
//! ## Tie-breaking
//! - Within a pass only a strictly greater candidate replaces `best[c]`, so
//!   the earlier action keeps the cell on equal profit.
//! - The winning capacity is the smallest `c` reaching the maximum of
//!   `best`: the cheapest subset among those of maximal profit.

use std::time::Instant;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::solver::{validate_budget, SolveControl, SolveResult};
use crate::types::Algorithm;

/// Solves the catalog under `budget` (cents) with the DP solver.
///
/// ## Errors
/// `InvalidBudget` when `budget` is negative. `TableTooLarge` when the
/// capped table cannot be allocated. Nothing else: an empty catalog, a zero
/// budget or a catalog where nothing fits all yield a zero-profit result
/// with an empty selection.
///
/// ## Example
/// ```rust
/// use pactole_core::{solve_dp, Action, Catalog, Money};
///
/// let actions = [(300, 50), (200, 40), (400, 70), (500, 80), (100, 10)]
///     .iter()
///     .enumerate()
///     .map(|(i, &(cost, profit))| {
///         Action::new(format!("item{}", i + 1), Money::from_cents(cost), Money::from_cents(profit))
///             .unwrap()
///     });
/// let catalog = Catalog::from_actions(actions).catalog;
///
/// let result = solve_dp(&catalog, 700).unwrap();
/// assert_eq!(result.best_profit.cents(), 120);
/// assert_eq!(result.chosen_indices, vec![0, 2]);
/// ```
pub fn solve_dp(catalog: &Catalog, budget: i64) -> CoreResult<SolveResult> {
    solve_dp_with(catalog, budget, &SolveControl::none())
}

/// [`solve_dp`] with a deadline / cancellation check before each action.
pub fn solve_dp_with(
    catalog: &Catalog,
    budget: i64,
    control: &SolveControl,
) -> CoreResult<SolveResult> {
    let started = Instant::now();
    validate_budget(budget)?;
    let capacity = effective_capacity(catalog, budget);
    let too_large = || CoreError::TableTooLarge {
        actions: catalog.len(),
        capacity,
    };

    let width = usize::try_from(capacity)
        .ok()
        .and_then(|c| c.checked_add(1))
        .ok_or_else(too_large)?;
    let mut best = zeroed::<i64>(width).ok_or_else(too_large)?;
    let mut taken = DecisionTable::new(catalog.len(), width).ok_or_else(too_large)?;
    let capacity = width - 1;
    let mut state_evaluations: u64 = 0;

    for (i, action) in catalog.iter().enumerate() {
        control.check()?;

        let cost = cost_index(action.cost());
        if cost > capacity {
            continue;
        }
        let profit = action.profit().cents();

        for c in (cost..=capacity).rev() {
            state_evaluations += 1;
            let candidate = best[c - cost] + profit;
            if candidate > best[c] {
                best[c] = candidate;
                taken.set(i, c);
            }
        }
    }

    let (winning_capacity, best_profit) = cheapest_maximum(&best);
    let chosen_indices = reconstruct(catalog, &taken, winning_capacity);

    let reconstructed: i64 = chosen_indices
        .iter()
        .filter_map(|&i| catalog.get(i))
        .map(|action| action.profit().cents())
        .sum();
    assert_eq!(
        reconstructed, best_profit,
        "DP reconstruction diverged from the optimum at capacity {winning_capacity}"
    );

    Ok(SolveResult::assemble(
        Algorithm::DynamicProgramming,
        catalog,
        Money::from_cents(budget),
        Money::from_cents(best_profit),
        chosen_indices,
        state_evaluations,
        started,
    ))
}

/// Largest capacity worth tabulating for `budget`.
fn effective_capacity(catalog: &Catalog, budget: i64) -> i64 {
    let affordable = catalog
        .iter()
        .map(|action| action.cost().cents())
        .filter(|&cost| cost <= budget)
        .fold(0i64, i64::saturating_add);
    budget.min(affordable)
}

/// A zero-filled vector, or `None` when `len` elements cannot be reserved.
fn zeroed<T: Copy + Default>(len: usize) -> Option<Vec<T>> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).ok()?;
    cells.resize(len, T::default());
    Some(cells)
}

/// Smallest capacity holding the maximum profit, and that profit.
fn cheapest_maximum(best: &[i64]) -> (usize, i64) {
    let mut winner = (0, best.first().copied().unwrap_or(0));
    for (c, &profit) in best.iter().enumerate().skip(1) {
        if profit > winner.1 {
            winner = (c, profit);
        }
    }
    winner
}

/// Walks the decision bits back from `capacity` and returns the chosen
/// catalog indices in ascending order.
fn reconstruct(catalog: &Catalog, taken: &DecisionTable, capacity: usize) -> Vec<usize> {
    let mut remaining = capacity;
    let mut chosen = Vec::new();

    for (i, action) in catalog.iter().enumerate().rev() {
        if taken.get(i, remaining) {
            // A bit is only set at c >= cost, so this cannot underflow.
            remaining -= cost_index(action.cost());
            chosen.push(i);
        }
    }

    chosen.reverse();
    chosen
}

/// Catalog costs are positive; anything beyond `usize` can never fit.
#[inline]
fn cost_index(cost: Money) -> usize {
    usize::try_from(cost.cents()).unwrap_or(usize::MAX)
}

// =============================================================================
// Decision Table
// =============================================================================

/// Row-major bit matrix: `rows` actions × `width` capacities.
struct DecisionTable {
    words: Vec<u64>,
    words_per_row: usize,
}

impl DecisionTable {
    fn new(rows: usize, width: usize) -> Option<Self> {
        let words_per_row = width.div_ceil(64);
        Some(DecisionTable {
            words: zeroed(rows.checked_mul(words_per_row)?)?,
            words_per_row,
        })
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize) {
        self.words[row * self.words_per_row + col / 64] |= 1u64 << (col % 64);
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        self.words[row * self.words_per_row + col / 64] & (1u64 << (col % 64)) != 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
