//! Schedule command implementation.
//!
//! Lists coupon periods generated backward from maturity.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use carry_bonds::generate_schedule;
use carry_core::types::Date;

use crate::commands::{parse_date, resolve_frequency};
use crate::output::{print_output, Context};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Tenor in whole years
    #[arg(short, long)]
    pub tenor: u32,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly
    #[arg(long)]
    pub frequency: Option<u32>,
}

/// One coupon period.
#[derive(Debug, Serialize, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "#")]
    pub period: usize,
    #[tabled(rename = "Accrual Start")]
    pub start: Date,
    #[tabled(rename = "Payment Date")]
    pub payment: Date,
    #[tabled(rename = "Days")]
    pub days: i64,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let maturity = parse_date(&args.maturity)?;
    let frequency = resolve_frequency(args.frequency, &ctx.config)?;
    let schedule = generate_schedule(maturity, frequency, args.tenor)?;

    let rows: Vec<PeriodRow> = schedule
        .periods()
        .enumerate()
        .map(|(i, (start, payment))| PeriodRow {
            period: i + 1,
            start,
            payment,
            days: start.days_between(&payment),
        })
        .collect();

    ctx.header(&format!(
        "Coupon Schedule: {} x {} to {}",
        schedule.len(),
        frequency,
        maturity
    ));
    if schedule.is_end_of_month() {
        ctx.info("Maturity is month-end; dates roll to month-end");
    }
    print_output(&rows, ctx.format)
}
