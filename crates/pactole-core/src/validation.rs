//! # Validation Module
//!
//! Input validation utilities for Pactole.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Loader (pactole-cli)                                         │
//! │  ├── Column presence, number syntax                                    │
//! │  └── Row-numbered error messages                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Normalizer (money.rs)                                        │
//! │  └── Negative / non-finite / out-of-range decimals                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Action invariants (name, non-negative cents)                      │
//! │  └── Caller guards (brute-force catalog ceiling)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Catalog filter                                               │
//! │  └── Zero cost / zero profit actions dropped, not failed               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest catalog the brute-force solver will accept through the
/// strategy dispatcher (2^30 subsets).
pub const MAX_BRUTE_FORCE_ACTIONS: usize = 30;

/// Validates an action name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use pactole_core::validation::validate_action_name;
///
/// assert!(validate_action_name("Share-12").is_ok());
/// assert!(validate_action_name("   ").is_err());
/// ```
pub fn validate_action_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount in minor units is zero or positive.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates that a catalog is small enough for exhaustive search.
///
/// ## Rules
/// - `max_actions` must be in `1..=MAX_BRUTE_FORCE_ACTIONS`
/// - `catalog_len` must not exceed `max_actions`
pub fn validate_brute_force_size(catalog_len: usize, max_actions: usize) -> ValidationResult<()> {
    if max_actions == 0 || max_actions > MAX_BRUTE_FORCE_ACTIONS {
        return Err(ValidationError::OutOfRange {
            field: "brute-force ceiling".to_string(),
            min: 1,
            max: MAX_BRUTE_FORCE_ACTIONS as i64,
        });
    }

    if catalog_len > max_actions {
        return Err(ValidationError::OutOfRange {
            field: "catalog size for brute force".to_string(),
            min: 0,
            max: max_actions as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
