//! Runs the dashboard core against a built-in sample payload and prints the
//! aggregates, useful for eyeballing the pipeline without a frontend.

use clap::Parser;
use time::{Date, macros::format_description};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use finboard::{
    DashboardConfig,
    aggregation::group_by_category,
    chart::build_segments,
    parse_transactions,
    rollup::{month_snapshot, monthly_series, year_over_year},
};

/// Demo runner for the finboard aggregation pipeline.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The number of months in the rolling monthly window.
    #[arg(long, default_value_t = 6)]
    window_months: usize,

    /// The anchor date the window ends at, as YYYY-MM-DD.
    #[arg(long, default_value = "2025-10-31")]
    anchor: String,
}

const SAMPLE_PAYLOAD: &str = r#"[
    {"id": "tx-01", "amount": 50000.0, "type": "credit", "category": "Salary", "merchant": "Acme Corp", "transactionDate": "2025-10-01"},
    {"id": "tx-02", "amount": 850.0, "type": "debit", "category": "Dining", "merchant": "Corner Cafe", "transactionDate": "2025-10-22"},
    {"id": "tx-03", "amount": 1200.0, "type": "debit", "category": "Utilities", "merchant": "Power Co", "transactionDate": "2025-10-05"},
    {"id": "tx-04", "amount": 430.5, "type": "debit", "category": "Transport", "merchant": "Metro", "transactionDate": "2025-09-14"},
    {"id": "tx-05", "amount": 2150.0, "type": "debit", "category": "Dining", "merchant": "Bistro", "transactionDate": "2025-08-02"},
    {"id": "tx-06", "amount": 310.0, "type": "debit", "category": "Shopping", "merchant": "Bookshop", "transactionDate": "2024-11-19"},
    {"id": "tx-07", "amount": 75.0, "type": "debit", "category": "Dining", "merchant": "", "transactionDate": "not-a-date"}
]"#;

fn main() {
    setup_logging();

    let args = Args::parse();
    let anchor = parse_anchor(&args.anchor);

    let config = DashboardConfig::default();
    let ingested = parse_transactions(SAMPLE_PAYLOAD).expect("sample payload is a JSON array");

    println!(
        "Ingested {} records ({} skipped)",
        ingested.records.len(),
        ingested.skipped.len()
    );
    for skipped in &ingested.skipped {
        println!(
            "  skipped #{} {}: {}",
            skipped.index,
            skipped.id.as_deref().unwrap_or("<no id>"),
            skipped.reason
        );
    }

    let snapshot = month_snapshot(&ingested.records, anchor, &config.income_categories);
    println!(
        "\n{} {}: income {:.2}, spending {:.2}, savings {:.2} ({:.1}%)",
        anchor.month(),
        anchor.year(),
        snapshot.income,
        snapshot.spending,
        snapshot.net_savings,
        snapshot.savings_rate
    );

    println!("\nMonthly window ({} months):", args.window_months);
    for bucket in monthly_series(&ingested.records, args.window_months, anchor) {
        println!(
            "  {} {}: income {:>10.2}  expense {:>10.2}",
            bucket.label(),
            bucket.year,
            bucket.income,
            bucket.expense
        );
    }

    let comparison = year_over_year(&ingested.records, anchor);
    println!(
        "\nYear over year: {} spent {:.2}, {} spent {:.2} ({:?})",
        comparison.current_year,
        comparison.current_year_total,
        comparison.previous_year,
        comparison.previous_year_total,
        comparison.percent_change
    );

    let breakdown = group_by_category(&ingested.records, &config.income_categories);
    println!("\nPie segments:");
    for segment in build_segments(&breakdown.by_category, config.palette.len(), None) {
        println!(
            "  {:<12} {:>9.2} ({:>5.1}%)  {:>7.1}° → {:>6.1}°  color {}",
            segment.category,
            segment.amount,
            segment.percentage,
            segment.start_angle_deg,
            segment.end_angle_deg,
            config.palette[segment.color_index]
        );
    }
}

fn parse_anchor(text: &str) -> Date {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(text, format).expect("--anchor must be a YYYY-MM-DD date")
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_filter(filter::LevelFilter::INFO),
        )
        .init();
}
