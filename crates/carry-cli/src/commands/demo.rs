//! Demo command implementation.
//!
//! The default scenario is the reference cash-and-carry trade: a 4%
//! semiannual bond maturing 2026-01-01 with a 2-year tenor, priced at 3%,
//! against a futures contract at 105 delivering 2025-10-01 and financed at
//! 4% repo.
//!
//! The other scenarios price on whole periods from a fractional
//! years-to-maturity and solve the yield back from the clean price.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use carry_bonds::discounting::WholePeriods;
use carry_bonds::pricing::accrued_interest;
use carry_bonds::yield_solver::{whole_period_price, YieldResult};
use carry_bonds::{price, BondSpec, PricingQuote, YieldSolver};
use carry_core::types::{Date, Frequency};
use carry_futures::FuturesContext;

use crate::commands::basis::{analyze, BasisInputs, BasisOutput};
use crate::commands::price::bond_rows;
use crate::commands::{parse_date, validate_yield};
use crate::output::{format_percent, print_report, Context, KeyValue};

const MATURITY: (i32, u32, u32) = (2026, 1, 1);
const COUPON_RATE: f64 = 0.04;
const TENOR_YEARS: u32 = 2;
const YIELD: f64 = 0.03;
const FUTURES_PRICE: f64 = 105.0;
const DELIVERY: (i32, u32, u32) = (2025, 10, 1);
const DEFAULT_SETTLEMENT: (i32, u32, u32) = (2025, 3, 15);

/// Scenarios the demo command can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scenario {
    /// Cash-and-carry basis on the 2026 deliverable
    #[default]
    Carry,
    /// 4% bond maturing 2040-06-30, viewed on 2025-08-25 at 4.2%
    LongBond,
    /// 4.5% bond maturing 2027-01-01, viewed on 2024-11-25 at 4.4%
    PreIssue,
    /// 10-year zero-coupon strip at 4.5%
    ZeroStrip,
}

/// Arguments for the demo command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Scenario to run
    #[arg(long, value_enum, default_value = "carry")]
    pub scenario: Scenario,

    /// Settlement date (YYYY-MM-DD). Defaults to the scenario's own date.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Repo rate (as percentage)
    #[arg(short, long, default_value = "4.0")]
    pub repo: f64,
}

#[derive(Serialize)]
struct DemoOutput {
    bond: BondSpec,
    quote: PricingQuote,
    yield_from_dirty: YieldResult,
    futures: FuturesContext,
    basis: BasisOutput,
}

/// A whole-period pricing case.
struct WholePeriodCase {
    title: &'static str,
    coupon_rate: f64,
    ytm: f64,
    horizon: Horizon,
}

/// How far the cash flows run.
enum Horizon {
    /// Settlement and maturity dates; years to maturity are Act/365.
    Dated {
        settlement: (i32, u32, u32),
        maturity: (i32, u32, u32),
    },
    /// Whole years with nothing accrued.
    Years(f64),
}

const LONG_BOND: WholePeriodCase = WholePeriodCase {
    title: "Long Bond",
    coupon_rate: 0.04,
    ytm: 0.042,
    horizon: Horizon::Dated {
        settlement: (2025, 8, 25),
        maturity: (2040, 6, 30),
    },
};

const PRE_ISSUE: WholePeriodCase = WholePeriodCase {
    title: "Bond Viewed Before Issue",
    coupon_rate: 0.045,
    ytm: 0.044,
    horizon: Horizon::Dated {
        settlement: (2024, 11, 25),
        maturity: (2027, 1, 1),
    },
};

const ZERO_STRIP: WholePeriodCase = WholePeriodCase {
    title: "Zero-Coupon Strip",
    coupon_rate: 0.0,
    ytm: 0.045,
    horizon: Horizon::Years(10.0),
};

#[derive(Serialize)]
struct WholePeriodOutput {
    settlement: Option<Date>,
    maturity: Option<Date>,
    coupon_rate: f64,
    ytm: f64,
    years_to_maturity: f64,
    whole_periods: u32,
    clean_price: f64,
    accrued_interest: f64,
    dirty_price: f64,
    implied_yield: YieldResult,
}

/// Execute the demo command.
pub fn execute(args: DemoArgs, ctx: &Context) -> Result<()> {
    match args.scenario {
        Scenario::Carry => carry(&args, ctx),
        Scenario::LongBond => whole_period(&LONG_BOND, &args, ctx),
        Scenario::PreIssue => whole_period(&PRE_ISSUE, &args, ctx),
        Scenario::ZeroStrip => whole_period(&ZERO_STRIP, &args, ctx),
    }
}

fn carry(args: &DemoArgs, ctx: &Context) -> Result<()> {
    let settlement = match args.settlement.as_deref() {
        Some(s) => parse_date(s)?,
        None => ymd(DEFAULT_SETTLEMENT)?,
    };
    let repo_rate = validate_yield("repo", args.repo)? / 100.0;
    let delivery = ymd(DELIVERY)?;

    let bond = BondSpec::builder()
        .face_value(ctx.config.bond.face_value)
        .coupon_rate(COUPON_RATE)
        .maturity(ymd(MATURITY)?)
        .tenor_years(TENOR_YEARS)
        .build()?;
    let schedule = bond.schedule()?;
    let solver = YieldSolver::from_config(ctx.config.solver);

    let quote = price(&bond, &schedule, settlement, YIELD)?;
    let yield_from_dirty = solver.solve_for_bond(&bond, quote.dirty_price)?;
    let futures = FuturesContext::evaluate(
        &bond,
        &schedule,
        FUTURES_PRICE,
        settlement,
        delivery,
        YIELD,
        &ctx.config.conventions,
        &solver,
    )?;
    let (basis, basis_rows) = analyze(
        &BasisInputs {
            bond: &bond,
            schedule: &schedule,
            futures_price: FUTURES_PRICE,
            settlement,
            delivery,
            ytm: YIELD,
            repo_rate,
        },
        ctx,
    )?;

    let headline = basis.report.basis_net_of_carry.to_string();

    let mut rows = bond_rows(&bond);
    rows.extend([
        KeyValue::new("Settlement", settlement.to_string()),
        KeyValue::new("Delivery", delivery.to_string()),
        KeyValue::from_percent("Yield", YIELD),
        KeyValue::from_f64("Clean Price", quote.clean_price, 6),
        KeyValue::from_f64("Accrued Interest", quote.accrued.amount, 6),
        KeyValue::from_f64("Dirty Price", quote.dirty_price, 6),
        KeyValue::new(
            "Yield from Dirty Price",
            format_percent(yield_from_dirty.yield_value, 6),
        ),
        KeyValue::from_f64("Futures Price", FUTURES_PRICE, 4),
        KeyValue::from_f64("Conversion Factor", futures.conversion_factor, 4),
        KeyValue::from_percent("Implied Forward Yield", futures.implied_forward_yield),
    ]);
    rows.extend(basis_rows);

    if ctx.config.solver.method != carry_bonds::SolverMethod::default() {
        ctx.info(&format!("Yield solver: {}", ctx.config.solver.method));
    }

    print_report(
        ctx,
        "Cash-and-Carry Scenario",
        &rows,
        &DemoOutput {
            bond,
            quote,
            yield_from_dirty,
            futures,
            basis,
        },
        &headline,
    )
}

fn whole_period(case: &WholePeriodCase, args: &DemoArgs, ctx: &Context) -> Result<()> {
    let face = ctx.config.bond.face_value;
    let frequency = Frequency::SemiAnnual;
    let solver = YieldSolver::from_config(ctx.config.solver);

    let (settlement, maturity, years, accrued) = match case.horizon {
        Horizon::Dated {
            settlement,
            maturity,
        } => {
            let settlement = match args.settlement.as_deref() {
                Some(s) => parse_date(s)?,
                None => ymd(settlement)?,
            };
            let maturity = ymd(maturity)?;
            let bond = BondSpec::builder()
                .face_value(face)
                .coupon_rate(case.coupon_rate)
                .frequency(frequency)
                .maturity(maturity)
                .tenor_covering(settlement)
                .build()?;
            let schedule = bond.schedule()?;
            let accrued = accrued_interest(&bond, &schedule, settlement)?.amount;
            let years = settlement.days_between(&maturity) as f64 / 365.0;
            (Some(settlement), Some(maturity), years, accrued)
        }
        Horizon::Years(years) => (None, None, years, 0.0),
    };

    let clean = whole_period_price(case.ytm, years, case.coupon_rate, face, frequency)?;
    let implied_yield = solver.solve(clean, years, case.coupon_rate, face, frequency)?;
    let output = WholePeriodOutput {
        settlement,
        maturity,
        coupon_rate: case.coupon_rate,
        ytm: case.ytm,
        years_to_maturity: years,
        whole_periods: WholePeriods::new(frequency, years)?.periods(),
        clean_price: clean,
        accrued_interest: accrued,
        dirty_price: clean + accrued,
        implied_yield,
    };

    let mut rows = Vec::new();
    if let (Some(settlement), Some(maturity)) = (settlement, maturity) {
        rows.push(KeyValue::new("Settlement", settlement.to_string()));
        rows.push(KeyValue::new("Maturity", maturity.to_string()));
    }
    rows.extend([
        KeyValue::from_percent("Coupon", case.coupon_rate),
        KeyValue::from_percent("Yield", case.ytm),
        KeyValue::from_f64("Years to Maturity", years, 6),
        KeyValue::new("Whole Periods", output.whole_periods.to_string()),
        KeyValue::from_f64("Clean Price", output.clean_price, 4),
        KeyValue::from_f64("Accrued Interest", output.accrued_interest, 4),
        KeyValue::from_f64("Dirty Price", output.dirty_price, 4),
        KeyValue::from_percent("Implied Yield", implied_yield.yield_value),
    ]);

    print_report(
        ctx,
        case.title,
        &rows,
        &output,
        &format!("{:.6}", output.clean_price),
    )
}

fn ymd((year, month, day): (i32, u32, u32)) -> Result<Date> {
    Ok(Date::from_ymd(year, month, day)?)
}
