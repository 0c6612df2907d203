//! Command-line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use pactole_core::Strategy;

use crate::config::Overrides;
use crate::report::OutputFormat;

/// Pick the most profitable set of actions that fits a budget.
#[derive(Debug, Parser)]
#[command(name = "pactole", version)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "PATH", env = "PACTOLE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve each dataset and print one report per file.
    Solve(SolveArgs),
    /// Run both solvers on one dataset and check they agree.
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
pub struct SolveArgs {
    /// CSV datasets.
    #[arg(required = true, value_name = "CSV")]
    pub files: Vec<PathBuf>,

    /// auto, dp or brute-force.
    #[arg(long)]
    pub strategy: Option<Strategy>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// CSV dataset.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Budget in euros.
    #[arg(long)]
    pub budget: Option<f64>,

    /// Largest catalog brute force may take.
    #[arg(long, value_name = "N")]
    pub brute_force_max: Option<usize>,

    /// Abort a solve after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// CSV field separator.
    #[arg(long)]
    pub delimiter: Option<char>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CommonArgs {
    pub fn overrides(&self, strategy: Option<Strategy>) -> Overrides {
        Overrides {
            budget: self.budget,
            strategy,
            brute_force_max: self.brute_force_max,
            timeout_ms: self.timeout_ms,
            delimiter: self.delimiter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "pactole", "solve", "a.csv", "b.csv", "--budget", "250", "--strategy", "dp",
            "--format", "json", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Solve(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.strategy, Some(Strategy::DynamicProgramming));
                assert_eq!(args.common.budget, Some(250.0));
                assert_eq!(args.common.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from(["pactole", "compare", "data.csv", "--timeout-ms", "50"])
            .unwrap();
        match cli.command {
            Command::Compare(args) => {
                assert_eq!(args.file, PathBuf::from("data.csv"));
                assert_eq!(args.common.timeout_ms, Some(50));
                assert_eq!(args.common.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_solve_requires_a_file() {
        assert!(Cli::try_parse_from(["pactole", "solve"]).is_err());
        assert!(Cli::try_parse_from(["pactole", "solve", "a.csv", "--strategy", "greedy"]).is_err());
    }
}
