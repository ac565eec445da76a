//! Basis command implementation.
//!
//! Net basis, carry to delivery and basis net of carry for a bond held
//! against a futures contract.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::types::Date;
use carry_futures::{basis_net_of_carry, implied_repo_rate, BasisReport};

use crate::commands::price::bond_rows;
use crate::commands::{parse_date, settlement_or_today, validate_price, validate_yield, BondArgs};
use crate::output::{print_report, Context, KeyValue};

/// Arguments for the basis command.
#[derive(Args, Debug)]
pub struct BasisArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Yield to maturity today (as percentage)
    #[arg(short = 'y', long = "yield")]
    pub yield_value: f64,

    /// Futures price
    #[arg(long)]
    pub futures: f64,

    /// Delivery date (YYYY-MM-DD)
    #[arg(short, long)]
    pub delivery: String,

    /// Repo rate financing the position (as percentage)
    #[arg(short, long)]
    pub repo: f64,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,
}

/// Basis figures as printed.
#[derive(Debug, Serialize)]
pub struct BasisOutput {
    /// Rounded report.
    #[serde(flatten)]
    pub report: BasisReport,
    /// Gross basis on the clean price.
    pub gross_basis_clean: f64,
    /// Gross basis on the dirty price.
    pub gross_basis_dirty: f64,
    /// Implied repo rate.
    pub implied_repo_rate: f64,
}

/// Inputs of a basis run after parsing.
pub struct BasisInputs<'a> {
    pub bond: &'a BondSpec,
    pub schedule: &'a CouponSchedule,
    pub futures_price: f64,
    pub settlement: Date,
    pub delivery: Date,
    pub ytm: f64,
    pub repo_rate: f64,
}

/// Runs the basis analysis and collects its display rows.
pub fn analyze(inputs: &BasisInputs<'_>, ctx: &Context) -> Result<(BasisOutput, Vec<KeyValue>)> {
    let conventions = &ctx.config.conventions;
    let breakdown = basis_net_of_carry(
        inputs.bond,
        inputs.schedule,
        inputs.futures_price,
        inputs.settlement,
        inputs.delivery,
        inputs.ytm,
        inputs.repo_rate,
        conventions,
    )?;
    let report = breakdown.report(conventions.report_decimals)?;
    let irr = implied_repo_rate(
        inputs.bond,
        inputs.schedule,
        inputs.futures_price,
        inputs.settlement,
        inputs.delivery,
        inputs.ytm,
        conventions,
    )?;

    let output = BasisOutput {
        report,
        gross_basis_clean: breakdown.gross_basis_clean(),
        gross_basis_dirty: breakdown.gross_basis_dirty(),
        implied_repo_rate: irr,
    };

    let decimals = conventions.report_decimals as usize;
    let mut rows: Vec<KeyValue> = report
        .entries()
        .into_iter()
        .map(|(name, value)| KeyValue::from_decimal(name, value))
        .collect();
    rows.extend([
        KeyValue::from_f64("gross_basis_clean", output.gross_basis_clean, decimals),
        KeyValue::from_f64("gross_basis_dirty", output.gross_basis_dirty, decimals),
        KeyValue::from_percent("implied_repo_rate", irr),
        KeyValue::from_percent("repo_rate", inputs.repo_rate),
    ]);

    Ok((output, rows))
}

/// Execute the basis command.
pub fn execute(args: BasisArgs, ctx: &Context) -> Result<()> {
    let settlement = settlement_or_today(args.settlement.as_deref())?;
    let delivery = parse_date(&args.delivery)?;
    let ytm = validate_yield("yield", args.yield_value)? / 100.0;
    let repo_rate = validate_yield("repo", args.repo)? / 100.0;
    let futures_price = validate_price("futures", args.futures)?;
    let (bond, schedule) = args.bond.build(&ctx.config, settlement)?;

    let (output, basis_rows) = analyze(
        &BasisInputs {
            bond: &bond,
            schedule: &schedule,
            futures_price,
            settlement,
            delivery,
            ytm,
            repo_rate,
        },
        ctx,
    )?;

    let mut rows = bond_rows(&bond);
    rows.push(KeyValue::new("Settlement", settlement.to_string()));
    rows.push(KeyValue::new("Delivery", delivery.to_string()));
    rows.extend(basis_rows);

    print_report(
        ctx,
        "Basis Net of Carry",
        &rows,
        &output,
        &output.report.basis_net_of_carry.to_string(),
    )
}
