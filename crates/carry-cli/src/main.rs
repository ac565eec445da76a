//! Carry CLI - bond futures basis and carry from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Coupon schedule
//! carry schedule --maturity 2026-01-01 --tenor 2
//!
//! # Price a bond from a yield
//! carry price --coupon 4.0 --maturity 2026-01-01 --yield 3.0 --settlement 2025-03-15
//!
//! # Yield from a price
//! carry yield --coupon 4.0 --tenor 2 --price 102.39
//!
//! # Basis net of carry against a futures contract
//! carry basis --coupon 4.0 --maturity 2026-01-01 --yield 3.0 \
//!     --futures 105 --delivery 2025-10-01 --repo 4.0 --settlement 2025-03-15
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::AppConfig;
use output::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;
    debug!(?config, "effective configuration");

    let ctx = Context {
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Yield(args) => commands::yield_::execute(args, &ctx)?,
        Commands::Futures(args) => commands::futures::execute(args, &ctx)?,
        Commands::Basis(args) => commands::basis::execute(args, &ctx)?,
        Commands::Demo(args) => commands::demo::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, cli.config.as_deref(), &ctx)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
