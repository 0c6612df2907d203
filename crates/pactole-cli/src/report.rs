//! # Reports
//!
//! Renders a [`Summary`] for humans (text) or machines (JSON).
//!
//! This is the only place cents become euros.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use pactole_core::{Money, RejectedAction, Summary};
use serde::Serialize;

const RULE_WIDTH: usize = 50;

/// Output format of `solve` and `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One solved dataset, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport<'a> {
    pub source: &'a str,
    pub removed: usize,
    pub rejected: &'a [RejectedAction],
    pub summary: &'a Summary,
}

// =============================================================================
// Text
// =============================================================================

/// Console report, one block per dataset.
///
/// ```text
/// Best investment (dynamic programming)
/// Source: dataset1.csv
/// Valid actions from dataset: 956 (44 removed)
/// States evaluated: 47800000
/// Execution time: 00:00:00.412
/// --------------------------------------------------
/// Budget: 500.00 €
/// Total cost: 499.94 €
/// Total profit after 2 years: 198.51 €
/// Remaining budget: 0.06 €
///
/// List of selected action(s): 22 actions
/// -> Share-GRUT: 4.98 € => Profit: 1.96 €
/// ```
pub fn render_text(report: &FileReport<'_>) -> String {
    let summary = report.summary;
    let mut out = String::new();

    out.push_str(&format!("Best investment ({})\n", summary.algorithm));
    out.push_str(&format!("Source: {}\n", report.source));
    out.push_str(&format!(
        "Valid actions from dataset: {} ({} removed)\n",
        summary.catalog_len, report.removed
    ));
    out.push_str(&format!("States evaluated: {}\n", summary.state_evaluations));
    out.push_str(&format!("Execution time: {}\n", format_elapsed(summary.elapsed)));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Budget: {}\n", format_euros(summary.budget)));
    out.push_str(&format!("Total cost: {}\n", format_euros(summary.total_cost)));
    out.push_str(&format!(
        "Total profit after 2 years: {}\n",
        format_euros(summary.total_profit)
    ));
    out.push_str(&format!(
        "Remaining budget: {}\n",
        format_euros(summary.remaining_budget)
    ));

    let label = if summary.item_count == 1 { "action" } else { "actions" };
    out.push_str(&format!(
        "\nList of selected action(s): {} {}\n",
        summary.item_count, label
    ));
    for item in &summary.items {
        out.push_str(&format!(
            "-> {}: {} => Profit: {}\n",
            item.name,
            format_euros(item.cost),
            format_euros(item.profit)
        ));
    }

    out
}

/// `HH:MM:SS.mmm`, hours not wrapped.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Major units, two decimals, euro sign.
pub fn format_euros(amount: Money) -> String {
    format!("{amount} €")
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonEnvelope<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: &'a T,
}

/// Pretty JSON with a `generated_at` timestamp (RFC 3339).
pub fn render_json<T: Serialize>(body: &T) -> Result<String, serde_json::Error> {
    render_json_at(body, Utc::now())
}

pub fn render_json_at<T: Serialize>(
    body: &T,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonEnvelope { generated_at, body })
}

// =============================================================================
// Comparison
// =============================================================================

/// Both solvers on one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport<'a> {
    pub source: &'a str,
    pub dynamic_programming: &'a Summary,
    pub brute_force: &'a Summary,
    pub profits_match: bool,
    /// Whether both solvers picked the same actions, a weaker property on ties.
    pub selections_match: bool,
}

pub fn render_comparison_text(
    comparison: &ComparisonReport<'_>,
    removed: usize,
    rejected: &[RejectedAction],
) -> String {
    let mut out = String::new();
    for summary in [comparison.dynamic_programming, comparison.brute_force] {
        out.push_str(&render_text(&FileReport {
            source: comparison.source,
            removed,
            rejected,
            summary,
        }));
        out.push('\n');
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    let verdict = if comparison.profits_match { "match" } else { "MISMATCH" };
    out.push_str(&format!("Best profit: {verdict}\n"));
    let selection = if comparison.selections_match {
        "identical"
    } else {
        "different (equally profitable)"
    };
    if comparison.profits_match {
        out.push_str(&format!("Selected actions: {selection}\n"));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
