//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BasisArgs, ConfigArgs, DemoArgs, FuturesArgs, PriceArgs, ScheduleArgs, YieldArgs,
};

/// Carry - bond futures basis and carry analytics
#[derive(Parser)]
#[command(name = "carry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress headers and status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "CARRY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a coupon schedule backward from maturity
    Schedule(ScheduleArgs),

    /// Clean price, accrued interest and dirty price from a yield
    Price(PriceArgs),

    /// Yield to maturity from a price
    Yield(YieldArgs),

    /// Conversion factor, implied repo and implied forward yield
    Futures(FuturesArgs),

    /// Net basis, carry to delivery and basis net of carry
    Basis(BasisArgs),

    /// Run the reference cash-and-carry scenario
    Demo(DemoArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
