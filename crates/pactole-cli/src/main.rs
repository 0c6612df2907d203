//! # pactole
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pactole solve data.csv --budget 500                                    │
//! │      │                                                                  │
//! │      ├─► config (defaults ◄ toml ◄ env ◄ flags)                         │
//! │      ├─► loader ─► Catalog::build ─► solve ─► project                   │
//! │      └─► report ─► stdout          logs ─► stderr                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use pactole_cli::cli::{Cli, Command};
use pactole_cli::commands::{run_compare, run_solve};
use pactole_cli::config::PactoleConfig;
use pactole_cli::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config =
        PactoleConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Solve(args) => {
            config.apply_overrides(&args.common.overrides(args.strategy));
            config.validate().context("Invalid command-line options")?;
            debug!(?config, "Effective configuration");

            run_solve(&config, &args.files, args.common.format, &mut out)
                .context("Solve failed")?;
        }
        Command::Compare(args) => {
            config.apply_overrides(&args.common.overrides(None));
            config.validate().context("Invalid command-line options")?;
            debug!(?config, "Effective configuration");

            run_compare(&config, &args.file, args.common.format, &mut out)
                .with_context(|| format!("Comparison failed for {}", args.file.display()))?;
        }
    }

    Ok(())
}
