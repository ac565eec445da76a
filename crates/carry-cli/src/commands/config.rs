//! Config command implementation.
//!
//! Displays the effective configuration and where it is read from.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::default_path;
use crate::output::{print_output, Context, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration file location
    Path,
}

#[derive(Serialize)]
struct PathOutput {
    path: Option<String>,
    exists: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, explicit: Option<&Path>, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(explicit, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
        OutputFormat::Minimal => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::from_f64("bond.face_value", config.bond.face_value, 2),
                KeyValue::new("bond.frequency", config.bond.frequency.to_string()),
                KeyValue::new(
                    "conventions.reference_yield",
                    config.conventions.reference_yield.to_string(),
                ),
                KeyValue::new("conventions.repo_basis", config.conventions.repo_basis.name()),
                KeyValue::new(
                    "conventions.report_decimals",
                    config.conventions.report_decimals.to_string(),
                ),
                KeyValue::new(
                    "conventions.cf_decimals",
                    config.conventions.cf_decimals.to_string(),
                ),
                KeyValue::new("solver.method", config.solver.method.to_string()),
                KeyValue::new("solver.tolerance", config.solver.tolerance.to_string()),
                KeyValue::new(
                    "solver.max_iterations",
                    config.solver.max_iterations.to_string(),
                ),
                KeyValue::new(
                    "solver.initial_guess",
                    config.solver.initial_guess.to_string(),
                ),
            ];
            ctx.header("Configuration");
            print_output(&rows, ctx.format)
        }
    }
}

fn path(explicit: Option<&Path>, ctx: &Context) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).or_else(default_path);
    let exists = path.as_deref().is_some_and(Path::exists);
    let display = path.as_ref().map(|p| p.display().to_string());

    match ctx.format {
        OutputFormat::Json => {
            let output = PathOutput {
                path: display,
                exists,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => match display {
            Some(p) if exists || ctx.quiet || ctx.format != OutputFormat::Table => println!("{p}"),
            Some(p) => println!("{p} (not found, using defaults)"),
            None => println!("No configuration directory on this platform"),
        },
    }
    Ok(())
}
