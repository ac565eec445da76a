//! Yield command implementation.
//!
//! Solves the whole-period yield to maturity that reproduces a price.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use carry_bonds::yield_solver::{whole_period_price, YieldResult};
use carry_bonds::{SolverMethod, YieldSolver};

use crate::commands::{resolve_frequency, validate_price, validate_rate, validate_yield};
use crate::output::{format_percent, print_report, Context, KeyValue};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    /// Annual coupon rate (as percentage, e.g., 4.0 for 4%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Tenor in years; floor(tenor x frequency) whole periods are priced
    #[arg(short, long)]
    pub tenor: f64,

    /// Price to match
    #[arg(short, long)]
    pub price: f64,

    /// Starting yield (as percentage). Defaults to the configured guess.
    #[arg(short, long)]
    pub guess: Option<f64>,

    /// Root finder. Defaults to the configured method.
    #[arg(long, value_parser = parse_method)]
    pub method: Option<SolverMethod>,

    /// Face value. Defaults to the configured face value.
    #[arg(long)]
    pub face: Option<f64>,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly
    #[arg(long)]
    pub frequency: Option<u32>,
}

fn parse_method(s: &str) -> Result<SolverMethod, String> {
    s.parse().map_err(|e: carry_core::CarryError| e.to_string())
}

#[derive(Serialize)]
struct YieldOutput {
    price: f64,
    tenor_years: f64,
    #[serde(flatten)]
    result: YieldResult,
    repriced: f64,
}

/// Execute the yield command.
pub fn execute(args: YieldArgs, ctx: &Context) -> Result<()> {
    let coupon = validate_rate("coupon", args.coupon, 0.0, 100.0)? / 100.0;
    let target = validate_price("price", args.price)?;
    let face = validate_price("face", args.face.unwrap_or(ctx.config.bond.face_value))?;
    let frequency = resolve_frequency(args.frequency, &ctx.config)?;

    let mut solver = YieldSolver::from_config(ctx.config.solver);
    if let Some(guess) = args.guess {
        solver = solver.with_initial_guess(validate_yield("guess", guess)? / 100.0);
    }
    if let Some(method) = args.method {
        solver = solver.with_method(method);
    }

    let result = solver.solve(target, args.tenor, coupon, face, frequency)?;
    let repriced = whole_period_price(result.yield_value, args.tenor, coupon, face, frequency)?;
    info!(
        method = %result.method,
        iterations = result.iterations,
        "yield solved"
    );

    let rows = vec![
        KeyValue::from_percent("Coupon", coupon),
        KeyValue::new("Tenor", format!("{}Y", args.tenor)),
        KeyValue::new("Frequency", frequency.to_string()),
        KeyValue::from_f64("Price", target, 6),
        KeyValue::new("Yield to Maturity", format_percent(result.yield_value, 6)),
        KeyValue::new("Method", result.method.to_string()),
        KeyValue::new("Iterations", result.iterations.to_string()),
        KeyValue::from_f64("Repriced", repriced, 6),
    ];

    print_report(
        ctx,
        "Yield to Maturity",
        &rows,
        &YieldOutput {
            price: target,
            tenor_years: args.tenor,
            result,
            repriced,
        },
        &format!("{:.8}", result.yield_value),
    )
}
