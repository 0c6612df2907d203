//! # Commands
//!
//! `solve` and `compare`, written against any output sink so tests can
//! capture what the binary prints.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pactole_core::solver::resolve_algorithm;
use pactole_core::{
    project, solve, solve_bruteforce_with, solve_dp_with, Catalog, CatalogBuild, SolveResult,
    Strategy,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PactoleConfig;
use crate::error::{CliError, CliResult};
use crate::loader;
use crate::report::{self, ComparisonReport, FileReport, OutputFormat};

/// A dataset loaded and filtered, ready for a solver.
struct Dataset {
    source: String,
    build: CatalogBuild,
}

impl Dataset {
    fn load(path: &Path, config: &PactoleConfig) -> CliResult<Self> {
        let raw = loader::load_path(path, config.delimiter()?)?;
        let build = Catalog::build(raw)?;

        info!(
            path = %path.display(),
            actions = build.catalog.len(),
            removed = build.removed(),
            "Catalog built"
        );
        for rejected in &build.rejected {
            debug!(name = %rejected.name, reason = %rejected.reason, "Action filtered out");
        }

        Ok(Dataset {
            source: path.display().to_string(),
            build,
        })
    }

    fn catalog(&self) -> &Catalog {
        &self.build.catalog
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn log_result(source: &str, result: &SolveResult) {
    info!(
        source,
        algorithm = %result.algorithm,
        best_profit = %result.best_profit,
        chosen = result.chosen.len(),
        evaluations = result.state_evaluations,
        elapsed_ms = elapsed_ms(result.elapsed),
        "Solve finished"
    );
}

// =============================================================================
// solve
// =============================================================================

#[derive(Serialize)]
struct SolveBatch<'a> {
    reports: Vec<FileReport<'a>>,
}

/// Solves every file with the configured strategy.
pub fn run_solve<W: Write>(
    config: &PactoleConfig,
    files: &[PathBuf],
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let budget = config.budget_cents()?;

    let mut datasets = Vec::with_capacity(files.len());
    let mut summaries = Vec::with_capacity(files.len());
    for path in files {
        let dataset = Dataset::load(path, config)?;
        if dataset.catalog().is_empty() {
            warn!(source = %dataset.source, "No valid actions in dataset");
        }

        let result = solve(dataset.catalog(), budget, &config.solve_options())?;
        log_result(&dataset.source, &result);

        summaries.push(project(&result));
        datasets.push(dataset);
    }

    let reports: Vec<FileReport<'_>> = datasets
        .iter()
        .zip(&summaries)
        .map(|(dataset, summary)| FileReport {
            source: &dataset.source,
            removed: dataset.build.removed(),
            rejected: &dataset.build.rejected,
            summary,
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for (i, file_report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", report::render_text(file_report))?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", report::render_json(&SolveBatch { reports })?)?;
        }
    }

    Ok(())
}

// =============================================================================
// compare
// =============================================================================

/// Runs both solvers on one file and fails when their optimal profits differ.
///
/// The report is written before the mismatch error is returned.
pub fn run_compare<W: Write>(
    config: &PactoleConfig,
    file: &Path,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let budget = config.budget_cents()?;
    let dataset = Dataset::load(file, config)?;

    resolve_algorithm(
        Strategy::BruteForce,
        dataset.catalog().len(),
        budget,
        config.solver.brute_force_max,
    )?;

    let dp = solve_dp_with(dataset.catalog(), budget, &config.solve_options().control)?;
    log_result(&dataset.source, &dp);
    let brute = solve_bruteforce_with(dataset.catalog(), budget, &config.solve_options().control)?;
    log_result(&dataset.source, &brute);

    let dp_summary = project(&dp);
    let brute_summary = project(&brute);
    let comparison = ComparisonReport {
        source: &dataset.source,
        dynamic_programming: &dp_summary,
        brute_force: &brute_summary,
        profits_match: dp.best_profit == brute.best_profit,
        selections_match: dp.chosen_indices == brute.chosen_indices,
    };

    match format {
        OutputFormat::Text => write!(
            out,
            "{}",
            report::render_comparison_text(
                &comparison,
                dataset.build.removed(),
                &dataset.build.rejected
            )
        )?,
        OutputFormat::Json => writeln!(out, "{}", report::render_json(&comparison)?)?,
    }

    if !comparison.profits_match {
        return Err(CliError::SolverMismatch {
            dp: dp.best_profit,
            brute_force: brute.best_profit,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
