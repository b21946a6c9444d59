//! Temporal rollups built on top of the aggregation primitives: the rolling
//! monthly series, the year-over-year spending comparison and the
//! current-month snapshot behind the dashboard summary cards.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use time::Date;

use crate::{
    aggregation::{MonthlyBucket, bucket_by_month, yearly_total},
    transaction::{TransactionRecord, TransactionType},
};

/// Year-over-year change in spending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    /// `(current - previous) / previous * 100`.
    Change(f64),
    /// The previous year had no spending, so a percentage would be a
    /// division by zero. Rendered as `"no-previous-data"`.
    NoPreviousData,
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PercentChange::Change(value) => serializer.serialize_f64(*value),
            PercentChange::NoPreviousData => serializer.serialize_str("no-previous-data"),
        }
    }
}

/// Spending in the anchor year compared against the year before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyComparison {
    /// The anchor calendar year.
    pub current_year: i32,
    /// The year before the anchor year.
    pub previous_year: i32,
    /// Total debit amount in the anchor year.
    pub current_year_total: f64,
    /// Total debit amount in the previous year.
    pub previous_year_total: f64,
    /// Relative change, or the no-previous-data sentinel.
    pub percent_change: PercentChange,
}

/// Income, spending and savings for one calendar month, as shown on the
/// dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSnapshot {
    /// The sum of credit amounts in the month.
    pub income: f64,
    /// The sum of non-income-category debit amounts in the month.
    pub spending: f64,
    /// `income - spending`. May be negative.
    pub net_savings: f64,
    /// `net_savings / income * 100`, or 0 when there is no income.
    pub savings_rate: f64,
    /// How many of the records fell in the month.
    pub transaction_count: usize,
}

/// The rolling monthly income/expense series ending at `anchor`'s month.
///
/// A thin wrapper over [`bucket_by_month`] so callers only deal in the
/// configured window length.
pub fn monthly_series(
    records: &[TransactionRecord],
    window_months: usize,
    anchor: Date,
) -> Vec<MonthlyBucket> {
    bucket_by_month(records, window_months, anchor)
}

/// Compares spending in `anchor`'s calendar year with the year before.
///
/// When the previous year has no spending the comparison carries
/// [`PercentChange::NoPreviousData`] instead of an infinite or NaN
/// percentage.
pub fn year_over_year(records: &[TransactionRecord], anchor: Date) -> YearlyComparison {
    let current_year = anchor.year();
    let previous_year = current_year - 1;

    let current_year_total = yearly_total(records, current_year, TransactionType::Debit);
    let previous_year_total = yearly_total(records, previous_year, TransactionType::Debit);

    let percent_change = if previous_year_total > 0.0 {
        PercentChange::Change(
            (current_year_total - previous_year_total) / previous_year_total * 100.0,
        )
    } else {
        PercentChange::NoPreviousData
    };

    YearlyComparison {
        current_year,
        previous_year,
        current_year_total,
        previous_year_total,
        percent_change,
    }
}

/// Summarizes `anchor`'s calendar month: income, spending, net savings and
/// savings rate.
///
/// Spending counts debit records outside `income_categories`, mirroring the
/// category spend view. The savings rate is 0 when the month has no income.
pub fn month_snapshot(
    records: &[TransactionRecord],
    anchor: Date,
    income_categories: &HashSet<String>,
) -> MonthSnapshot {
    let in_month = |record: &&TransactionRecord| {
        record.date.year() == anchor.year() && record.date.month() == anchor.month()
    };

    let mut income = 0.0;
    let mut spending = 0.0;
    let mut transaction_count = 0;

    for record in records.iter().filter(in_month) {
        transaction_count += 1;
        match record.kind {
            TransactionType::Credit => income += record.amount,
            TransactionType::Debit => {
                if !income_categories.contains(&record.category) {
                    spending += record.amount;
                }
            }
        }
    }

    let net_savings = income - spending;
    let savings_rate = if income > 0.0 {
        net_savings / income * 100.0
    } else {
        0.0
    };

    MonthSnapshot {
        income,
        spending,
        net_savings,
        savings_rate,
        transaction_count,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::config::DashboardConfig;

    fn create_test_record(amount: f64, kind: TransactionType, date: Date) -> TransactionRecord {
        TransactionRecord {
            id: format!("{kind:?}-{date}-{amount}"),
            amount,
            kind,
            category: "Dining".to_string(),
            merchant: String::new(),
            date,
            description: None,
            balance: None,
        }
    }

    #[test]
    fn percent_change_compares_debit_totals() {
        let records = vec![
            create_test_record(400.0, TransactionType::Debit, date!(2024 - 05 - 01)),
            create_test_record(500.0, TransactionType::Debit, date!(2025 - 05 - 01)),
            // Credits never count as spending.
            create_test_record(9000.0, TransactionType::Credit, date!(2024 - 01 - 01)),
        ];

        let comparison = year_over_year(&records, date!(2025 - 10 - 22));

        assert_eq!(comparison.current_year, 2025);
        assert_eq!(comparison.previous_year, 2024);
        assert_eq!(comparison.current_year_total, 500.0);
        assert_eq!(comparison.previous_year_total, 400.0);
        assert_eq!(comparison.percent_change, PercentChange::Change(25.0));
    }

    #[test]
    fn missing_previous_year_yields_sentinel_not_infinity() {
        let records = vec![create_test_record(
            500.0,
            TransactionType::Debit,
            date!(2025 - 05 - 01),
        )];

        let comparison = year_over_year(&records, date!(2025 - 10 - 22));

        assert_eq!(comparison.previous_year_total, 0.0);
        assert_eq!(comparison.percent_change, PercentChange::NoPreviousData);
    }

    #[test]
    fn no_previous_data_serializes_as_sentinel_string() {
        let json = serde_json::to_string(&PercentChange::NoPreviousData).unwrap();
        assert_eq!(json, "\"no-previous-data\"");

        let json = serde_json::to_string(&PercentChange::Change(25.0)).unwrap();
        assert_eq!(json, "25.0");
    }

    #[test]
    fn monthly_series_has_configured_length() {
        let series = monthly_series(&[], 6, date!(2025 - 10 - 22));
        assert_eq!(series.len(), 6);
    }

    #[test]
    fn snapshot_summarizes_anchor_month_only() {
        let config = DashboardConfig::default();
        let mut salary =
            create_test_record(50000.0, TransactionType::Credit, date!(2025 - 10 - 01));
        salary.category = "Salary".to_string();
        let records = vec![
            salary,
            create_test_record(850.0, TransactionType::Debit, date!(2025 - 10 - 22)),
            create_test_record(150.0, TransactionType::Debit, date!(2025 - 10 - 28)),
            // Previous month, excluded from the snapshot.
            create_test_record(999.0, TransactionType::Debit, date!(2025 - 09 - 30)),
        ];

        let snapshot = month_snapshot(&records, date!(2025 - 10 - 15), &config.income_categories);

        assert_eq!(snapshot.income, 50000.0);
        assert_eq!(snapshot.spending, 1000.0);
        assert_eq!(snapshot.net_savings, 49000.0);
        assert_eq!(snapshot.savings_rate, 98.0);
        assert_eq!(snapshot.transaction_count, 3);
    }

    #[test]
    fn snapshot_savings_rate_guards_zero_income() {
        let config = DashboardConfig::default();
        let records = vec![create_test_record(
            850.0,
            TransactionType::Debit,
            date!(2025 - 10 - 22),
        )];

        let snapshot = month_snapshot(&records, date!(2025 - 10 - 15), &config.income_categories);

        assert_eq!(snapshot.income, 0.0);
        assert_eq!(snapshot.savings_rate, 0.0);
        assert_eq!(snapshot.net_savings, -850.0);
    }
}
