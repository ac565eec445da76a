//! Futures command implementation.
//!
//! Conversion factor, implied repo rate and implied forward yield of a
//! deliverable bond.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use carry_bonds::{accrued_interest, YieldSolver};
use carry_futures::FuturesContext;

use crate::commands::price::bond_rows;
use crate::commands::{parse_date, settlement_or_today, validate_price, validate_yield, BondArgs};
use crate::output::{print_report, Context, KeyValue};

/// Arguments for the futures command.
#[derive(Args, Debug)]
pub struct FuturesArgs {
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

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,
}

#[derive(Serialize)]
struct FuturesOutput {
    #[serde(flatten)]
    context: FuturesContext,
    ai_delivery: f64,
    invoice_price: f64,
}

/// Execute the futures command.
pub fn execute(args: FuturesArgs, ctx: &Context) -> Result<()> {
    let settlement = settlement_or_today(args.settlement.as_deref())?;
    let delivery = parse_date(&args.delivery)?;
    let ytm = validate_yield("yield", args.yield_value)? / 100.0;
    let futures_price = validate_price("futures", args.futures)?;
    let (bond, schedule) = args.bond.build(&ctx.config, settlement)?;

    let solver = YieldSolver::from_config(ctx.config.solver);
    let context = FuturesContext::evaluate(
        &bond,
        &schedule,
        futures_price,
        settlement,
        delivery,
        ytm,
        &ctx.config.conventions,
        &solver,
    )?;
    let ai_delivery = accrued_interest(&bond, &schedule, delivery)?.amount;
    let invoice_price = context.invoice_price(ai_delivery);

    let mut rows = bond_rows(&bond);
    rows.extend([
        KeyValue::new("Settlement", settlement.to_string()),
        KeyValue::new("Delivery", delivery.to_string()),
        KeyValue::from_f64("Futures Price", futures_price, 4),
        KeyValue::from_f64("Conversion Factor", context.conversion_factor, 4),
        KeyValue::from_f64("Accrued at Delivery", ai_delivery, 6),
        KeyValue::from_f64("Invoice Price", invoice_price, 6),
        KeyValue::from_percent("Implied Repo Rate", context.implied_repo_rate),
        KeyValue::from_percent("Implied Forward Yield", context.implied_forward_yield),
        KeyValue::new("Repo Day Count", ctx.config.conventions.repo_basis.name()),
    ]);

    print_report(
        ctx,
        "Futures Analytics",
        &rows,
        &FuturesOutput {
            context,
            ai_delivery,
            invoice_price,
        },
        &format!("{:.8}", context.implied_repo_rate),
    )
}
