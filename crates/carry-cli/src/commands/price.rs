//! Price command implementation.
//!
//! Clean price, accrued interest and dirty price from a yield.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use carry_bonds::{price, BondSpec, PricingQuote};

use crate::commands::{settlement_or_today, validate_yield, BondArgs};
use crate::output::{print_report, Context, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Yield to maturity (as percentage)
    #[arg(short = 'y', long = "yield")]
    pub yield_value: f64,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,
}

#[derive(Serialize)]
struct PriceOutput<'a> {
    bond: &'a BondSpec,
    #[serde(flatten)]
    quote: PricingQuote,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let settlement = settlement_or_today(args.settlement.as_deref())?;
    let ytm = validate_yield("yield", args.yield_value)? / 100.0;
    let (bond, schedule) = args.bond.build(&ctx.config, settlement)?;

    let quote = price(&bond, &schedule, settlement, ytm)?;

    let mut rows = bond_rows(&bond);
    rows.extend([
        KeyValue::new("Settlement", settlement.to_string()),
        KeyValue::from_percent("Yield", ytm),
        KeyValue::from_f64("Clean Price", quote.clean_price, 6),
        KeyValue::from_f64("Accrued Interest", quote.accrued.amount, 6),
        KeyValue::from_f64("Dirty Price", quote.dirty_price, 6),
        KeyValue::new("Last Coupon", quote.accrued.last_coupon.to_string()),
        KeyValue::new("Next Coupon", quote.accrued.next_coupon.to_string()),
        KeyValue::new(
            "Days Accrued",
            format!("{} / {}", quote.accrued.days_accrued, quote.accrued.days_in_period),
        ),
    ]);

    print_report(
        ctx,
        "Bond Pricing Results",
        &rows,
        &PriceOutput { bond: &bond, quote },
        &format!("{:.6}", quote.clean_price),
    )
}

/// Rows describing the bond terms.
pub fn bond_rows(bond: &BondSpec) -> Vec<KeyValue> {
    vec![
        KeyValue::from_percent("Coupon", bond.coupon_rate()),
        KeyValue::new("Maturity", bond.maturity().to_string()),
        KeyValue::new("Tenor", format!("{}Y", bond.tenor_years())),
        KeyValue::new("Frequency", bond.frequency().to_string()),
        KeyValue::from_f64("Face Value", bond.face_value(), 2),
    ]
}
