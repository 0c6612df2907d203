//! # pactole-core: Pure Selection Logic for Pactole
//!
//! Picks the most profitable set of investment actions that fits a budget
//! (0/1 knapsack over integer cents). Everything here is a pure function of
//! its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pactole Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pactole-cli                                  │   │
//! │  │    CSV loader ──► config ──► report (text / JSON)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RawAction, budget                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pactole-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  catalog  │  │  solver   │  │  summary  │  │   │
//! │  │   │   Money   │─►│  Catalog  │─►│  dp       │─►│  Summary  │  │   │
//! │  │   │ normalize │  │  filter   │  │  brute    │  │  project  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Cents newtype and the decimal normalizer
//! - [`types`] - Action, RawAction, Algorithm
//! - [`catalog`] - Validated ordered action sets
//! - [`solver`] - DP solver, brute-force oracle, strategy dispatch
//! - [`summary`] - Result projection for the report layer
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: decimals are converted to cents once, up front
//! 2. **Explicit Parameters**: the budget is always an argument, never a global
//! 3. **Deterministic**: same catalog and budget give the same selection
//! 4. **Explicit Errors**: typed errors for bad input, assertions for broken invariants
//!
//! ## Example Usage
//!
//! ```rust
//! use pactole_core::{project, solve_dp, Catalog, RawAction, money::to_minor_units};
//!
//! let build = Catalog::build(vec![
//!     RawAction::with_rate("Share-1", 3.00, 16.0),
//!     RawAction::with_rate("Share-2", 2.00, 20.0),
//!     RawAction::with_rate("Share-3", 4.00, 17.5),
//! ])
//! .unwrap();
//!
//! let budget = to_minor_units(7.00).unwrap();
//! let result = solve_dp(&build.catalog, budget.cents()).unwrap();
//! let summary = project(&result);
//!
//! // 3.00 @ 16% + 4.00 @ 17.5% = 0.48 + 0.70
//! assert_eq!(summary.total_profit.cents(), 118);
//! assert_eq!(summary.item_count, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod solver;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogBuild, RejectReason, RejectedAction};
pub use error::{AmountIssue, CoreError, CoreResult, InterruptReason, ValidationError};
pub use money::Money;
pub use solver::{
    solve, solve_bruteforce, solve_bruteforce_with, solve_dp, solve_dp_with, SolveControl,
    SolveOptions, SolveResult, Strategy,
};
pub use summary::{project, Summary, SummaryLine};
pub use types::*;
