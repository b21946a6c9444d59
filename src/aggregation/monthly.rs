//! Fixed-length rolling monthly windows of income and expense totals.

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::{TransactionRecord, TransactionType};

/// Aggregated income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
    /// The sum of credit amounts in this month.
    pub income: f64,
    /// The sum of debit amounts in this month.
    pub expense: f64,
}

impl MonthlyBucket {
    fn empty(year: i32, month: Month) -> Self {
        Self {
            year,
            month,
            income: 0.0,
            expense: 0.0,
        }
    }

    /// The month as a three-letter abbreviation, e.g. "Jan".
    pub fn label(&self) -> &'static str {
        match self.month {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }
}

/// Buckets records into `window_months` consecutive calendar months ending
/// at `anchor`'s month inclusive.
///
/// The window is always fully populated: months without any matching records
/// get a zero-valued bucket rather than being omitted, and buckets come back
/// oldest first. Records outside the window are ignored.
pub fn bucket_by_month(
    records: &[TransactionRecord],
    window_months: usize,
    anchor: Date,
) -> Vec<MonthlyBucket> {
    let anchor_index = month_index(anchor.year(), anchor.month());
    let window_start = anchor_index - (window_months as i64 - 1);

    let mut buckets: Vec<MonthlyBucket> = (0..window_months)
        .map(|offset| {
            let (year, month) = month_from_index(window_start + offset as i64);
            MonthlyBucket::empty(year, month)
        })
        .collect();

    for record in records {
        let offset = month_index(record.date.year(), record.date.month()) - window_start;
        if offset < 0 || offset as usize >= window_months {
            continue;
        }

        let bucket = &mut buckets[offset as usize];
        match record.kind {
            TransactionType::Credit => bucket.income += record.amount,
            TransactionType::Debit => bucket.expense += record.amount,
        }
    }

    buckets
}

/// Maps a calendar month onto a single monotonic axis so window membership
/// is a plain range check.
fn month_index(year: i32, month: Month) -> i64 {
    year as i64 * 12 + (month as i64 - 1)
}

fn month_from_index(index: i64) -> (i32, Month) {
    let year = index.div_euclid(12) as i32;
    let month_number = index.rem_euclid(12) as u8 + 1;
    let month = Month::try_from(month_number).expect("month number is always in 1..=12");

    (year, month)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn create_test_record(
        amount: f64,
        kind: TransactionType,
        date: Date,
    ) -> TransactionRecord {
        TransactionRecord {
            id: format!("{kind:?}-{date}"),
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
    fn window_is_always_fully_populated() {
        let records = vec![create_test_record(
            100.0,
            TransactionType::Debit,
            date!(2025 - 10 - 22),
        )];

        let buckets = bucket_by_month(&records, 6, date!(2025 - 10 - 31));

        assert_eq!(buckets.len(), 6);
        // May through September are zero-valued, not omitted.
        for bucket in &buckets[..5] {
            assert_eq!((bucket.income, bucket.expense), (0.0, 0.0));
        }
        assert_eq!(buckets[5].expense, 100.0);
    }

    #[test]
    fn window_is_contiguous_across_a_year_boundary() {
        let buckets = bucket_by_month(&[], 6, date!(2025 - 02 - 14));

        let months: Vec<(i32, Month)> = buckets
            .iter()
            .map(|bucket| (bucket.year, bucket.month))
            .collect();

        assert_eq!(
            months,
            vec![
                (2024, Month::September),
                (2024, Month::October),
                (2024, Month::November),
                (2024, Month::December),
                (2025, Month::January),
                (2025, Month::February),
            ]
        );
    }

    #[test]
    fn sums_income_and_expense_separately() {
        let records = vec![
            create_test_record(50000.0, TransactionType::Credit, date!(2025 - 10 - 01)),
            create_test_record(850.0, TransactionType::Debit, date!(2025 - 10 - 22)),
            create_test_record(150.0, TransactionType::Debit, date!(2025 - 10 - 29)),
        ];

        let buckets = bucket_by_month(&records, 1, date!(2025 - 10 - 31));

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].income, 50000.0);
        assert_eq!(buckets[0].expense, 1000.0);
    }

    #[test]
    fn ignores_records_outside_the_window() {
        let records = vec![
            create_test_record(10.0, TransactionType::Debit, date!(2025 - 04 - 30)),
            create_test_record(20.0, TransactionType::Debit, date!(2025 - 11 - 01)),
        ];

        let buckets = bucket_by_month(&records, 6, date!(2025 - 10 - 15));

        let expense_total: f64 = buckets.iter().map(|bucket| bucket.expense).sum();
        assert_eq!(expense_total, 0.0);
    }

    #[test]
    fn zero_window_yields_no_buckets() {
        let buckets = bucket_by_month(&[], 0, date!(2025 - 10 - 15));

        assert!(buckets.is_empty());
    }

    #[test]
    fn labels_are_three_letter_abbreviations() {
        let buckets = bucket_by_month(&[], 3, date!(2025 - 01 - 10));

        let labels: Vec<&str> = buckets.iter().map(MonthlyBucket::label).collect();
        assert_eq!(labels, vec!["Nov", "Dec", "Jan"]);
    }
}
