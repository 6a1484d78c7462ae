//! The `texty stats` command.

use anyhow::Result;
use serde::Serialize;
use texty_core::AggregateStats;

use crate::session::Session;

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    book: &'a str,
    problem_sets: usize,
    #[serde(flatten)]
    totals: AggregateStats,
    percent_right: Option<f64>,
}

pub fn execute(session: &Session, format: &str) -> Result<()> {
    let psm = session.open_manager()?;
    let totals = psm.aggregate_stats();
    let report = StatsReport {
        book: psm.source_name(),
        problem_sets: psm.len(),
        totals,
        percent_right: totals.percent_right(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_table(&report),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
    Ok(())
}

fn print_table(report: &StatsReport<'_>) {
    use comfy_table::{Cell, Table};

    let percent = report
        .percent_right
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| "0%".to_string());

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(format!("Descriptive statistics for {}", report.book)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Problem sets"),
        Cell::new(report.problem_sets),
    ]);
    table.add_row(vec![
        Cell::new("Total reviewed"),
        Cell::new(report.totals.total_attempts),
    ]);
    table.add_row(vec![Cell::new("Percent right"), Cell::new(percent)]);
    table.add_row(vec![
        Cell::new("Total correct"),
        Cell::new(report.totals.total_right),
    ]);
    table.add_row(vec![
        Cell::new("Total incorrect"),
        Cell::new(report.totals.total_wrong),
    ]);

    println!("{table}");
}
