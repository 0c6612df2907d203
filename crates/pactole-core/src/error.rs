//! # Error Types
//!
//! Domain-specific error types for pactole-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pactole-core errors (this file)                                       │
//! │  ├── CoreError        - Normalization, budget and solve failures       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pactole-cli errors (separate crate)                                   │
//! │  ├── LoadError        - CSV reading and cell parsing                   │
//! │  ├── ConfigError      - TOML / environment configuration               │
//! │  └── CliError         - What the binary reports                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, limit)
//! 3. Errors are enum variants, never String
//! 4. Solvers fail on preconditions and on an unallocatable DP table only

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A decimal amount could not be turned into minor units.
    ///
    /// ## When This Occurs
    /// - The amount is negative
    /// - The amount is NaN or ±infinity
    /// - The amount scaled to cents does not fit in an `i64`
    ///
    /// Only the normalizer raises this. Solvers see integers exclusively.
    #[error("Invalid amount for {field}: {value} ({reason})")]
    InvalidAmount {
        field: String,
        value: f64,
        reason: AmountIssue,
    },

    /// The budget handed to a solver is negative.
    ///
    /// Raised before any DP table is allocated.
    #[error("Invalid budget: {0} cents (budget must be zero or positive)")]
    InvalidBudget(i64),

    /// The DP table for this catalog cannot be allocated.
    ///
    /// The table is already capped at the total cost of the affordable
    /// actions, so this needs individual costs in the billions of cents.
    #[error("DP table too large: {actions} actions up to a capacity of {capacity} cents")]
    TableTooLarge { actions: usize, capacity: i64 },

    /// A solve was stopped through its [`SolveControl`](crate::solver::SolveControl).
    ///
    /// No partial result is produced.
    #[error("Solve interrupted: {0}")]
    Interrupted(InterruptReason),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidAmount error.
    pub fn invalid_amount(field: impl Into<String>, value: f64, reason: AmountIssue) -> Self {
        CoreError::InvalidAmount {
            field: field.into(),
            value,
            reason,
        }
    }
}

/// Why a decimal amount was refused by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountIssue {
    Negative,
    NotFinite,
    OutOfRange,
}

impl fmt::Display for AmountIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountIssue::Negative => write!(f, "must not be negative"),
            AmountIssue::NotFinite => write!(f, "must be a finite number"),
            AmountIssue::OutOfRange => write!(f, "too large to represent in cents"),
        }
    }
}

/// Why a controlled solve stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    DeadlineExceeded,
    Cancelled,
}

impl fmt::Display for InterruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterruptReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            InterruptReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any solver runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
