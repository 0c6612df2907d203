//! # Configuration
//!
//! Effective settings for one `pactole` run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --budget 250 --strategy dp --timeout-ms 2000                       │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PACTOLE_BUDGET=250     PACTOLE_STRATEGY=dp                         │
//! │     PACTOLE_BRUTE_FORCE_MAX=18   PACTOLE_TIMEOUT_MS=2000               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, otherwise                                         │
//! │     ~/.config/pactole/pactole.toml (Linux)                             │
//! │     ~/Library/Application Support/com.pactole.pactole/pactole.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     budget 500.00, strategy auto, ceiling 20, no timeout               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pactole.toml
//! [solver]
//! budget = 500.0          # major units
//! strategy = "auto"       # auto | dp | brute-force
//! brute_force_max = 20    # largest catalog brute force may take
//! timeout_ms = 5000       # omit for no deadline
//!
//! [input]
//! delimiter = ","
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use pactole_core::money::to_minor_units;
use pactole_core::solver::{SolveControl, SolveOptions, Strategy, DEFAULT_BRUTE_FORCE_MAX};
use pactole_core::validation::MAX_BRUTE_FORCE_ACTIONS;

use crate::error::ConfigError;

/// Budget used when nothing else sets one, in major units.
pub const DEFAULT_BUDGET: f64 = 500.0;

const CONFIG_FILE_NAME: &str = "pactole.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[solver]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Budget in major units (euros).
    pub budget: f64,
    pub strategy: Strategy,
    /// Largest catalog the brute-force solver is allowed to take.
    pub brute_force_max: usize,
    /// Per-file solve deadline in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            budget: DEFAULT_BUDGET,
            strategy: Strategy::Auto,
            brute_force_max: DEFAULT_BRUTE_FORCE_MAX,
            timeout_ms: None,
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// CSV field separator, a single ASCII character.
    pub delimiter: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings {
            delimiter: ",".to_string(),
        }
    }
}

// =============================================================================
// Overrides
// =============================================================================

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub budget: Option<f64>,
    pub strategy: Option<Strategy>,
    pub brute_force_max: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub delimiter: Option<char>,
}

// =============================================================================
// Pactole Config
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PactoleConfig {
    #[serde(default)]
    pub solver: SolverSettings,

    #[serde(default)]
    pub input: InputSettings,
}

impl PactoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `explicit_path`, else the platform config dir
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error. A missing file in
    /// the platform config dir just means defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `PACTOLE_*` variables looked up through `lookup`.
    ///
    /// Unlike a missing variable, an unparseable one is an error.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PACTOLE_BUDGET") {
            self.solver.budget = parse_env("PACTOLE_BUDGET", &raw)?;
            debug!(budget = self.solver.budget, "Overriding budget from environment");
        }

        if let Some(raw) = lookup("PACTOLE_STRATEGY") {
            self.solver.strategy = raw
                .parse()
                .map_err(|e: pactole_core::ValidationError| {
                    ConfigError::invalid("PACTOLE_STRATEGY", e.to_string())
                })?;
            debug!(strategy = %self.solver.strategy, "Overriding strategy from environment");
        }

        if let Some(raw) = lookup("PACTOLE_BRUTE_FORCE_MAX") {
            self.solver.brute_force_max = parse_env("PACTOLE_BRUTE_FORCE_MAX", &raw)?;
        }

        if let Some(raw) = lookup("PACTOLE_TIMEOUT_MS") {
            self.solver.timeout_ms = Some(parse_env("PACTOLE_TIMEOUT_MS", &raw)?);
        }

        Ok(())
    }

    /// Applies command-line values on top of everything else.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(budget) = overrides.budget {
            self.solver.budget = budget;
        }
        if let Some(strategy) = overrides.strategy {
            self.solver.strategy = strategy;
        }
        if let Some(max) = overrides.brute_force_max {
            self.solver.brute_force_max = max;
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.solver.timeout_ms = Some(timeout);
        }
        if let Some(delimiter) = overrides.delimiter {
            self.input.delimiter = delimiter.to_string();
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let budget = self.solver.budget;
        if !budget.is_finite() {
            return Err(ConfigError::invalid("budget", "must be a finite number"));
        }
        if budget < 0.0 {
            return Err(ConfigError::invalid("budget", "must not be negative"));
        }
        to_minor_units(budget).map_err(|e| ConfigError::invalid("budget", e.to_string()))?;

        let max = self.solver.brute_force_max;
        if max == 0 || max > MAX_BRUTE_FORCE_ACTIONS {
            return Err(ConfigError::invalid(
                "brute_force_max",
                format!("must be between 1 and {MAX_BRUTE_FORCE_ACTIONS}"),
            ));
        }

        if self.solver.timeout_ms == Some(0) {
            return Err(ConfigError::invalid("timeout_ms", "must be greater than 0"));
        }

        self.delimiter()?;

        Ok(())
    }

    /// Budget in cents.
    pub fn budget_cents(&self) -> Result<i64, ConfigError> {
        to_minor_units(self.solver.budget)
            .map(|money| money.cents())
            .map_err(|e| ConfigError::invalid("budget", e.to_string()))
    }

    /// CSV delimiter byte.
    pub fn delimiter(&self) -> Result<u8, ConfigError> {
        match self.input.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::invalid(
                "delimiter",
                format!("'{}' is not a single ASCII character", self.input.delimiter),
            )),
        }
    }

    /// Solver options for one solve. The deadline starts counting now.
    pub fn solve_options(&self) -> SolveOptions {
        let control = match self.solver.timeout_ms {
            Some(ms) => SolveControl::none().with_timeout(Duration::from_millis(ms)),
            None => SolveControl::none(),
        };

        SolveOptions {
            strategy: self.solver.strategy,
            brute_force_max: self.solver.brute_force_max,
            control,
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pactole", "pactole")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{raw}'")))
}

// =============================================================================
// Unit Tests
// =============================================================================
