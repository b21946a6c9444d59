//! Grouping of transaction amounts by spending category.

use std::collections::HashSet;

use serde::Serialize;

use crate::transaction::{TransactionRecord, TransactionType};

/// One category and its accumulated amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The accumulated amount over the contributing records.
    pub amount: f64,
}

/// A mapping from category name to accumulated amount.
///
/// Entries keep the order in which each category was first seen in the
/// input. The chart builder relies on that order to break ties between
/// segments with equal amounts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategorySummary {
    entries: Vec<CategoryTotal>,
}

impl CategorySummary {
    /// Adds `amount` to `category`, inserting the category in first-seen
    /// position if it is new.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.category == category)
        {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal {
                category: category.to_string(),
                amount,
            }),
        }
    }

    /// The entries in first-seen order.
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// The accumulated amount for `category`, if any records used it.
    pub fn amount_for(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    /// The sum of all accumulated amounts.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    /// Whether no category has accumulated anything.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, f64)> for CategorySummary {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut summary = CategorySummary::default();
        for (category, amount) in iter {
            summary.add(&category, amount);
        }
        summary
    }
}

/// The spend view of a record set: spending grouped by category, with income
/// reported as a separate scalar rather than folded into the mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpendBreakdown {
    /// Debit amounts accumulated per non-income category.
    pub by_category: CategorySummary,
    /// The total of all credit amounts.
    pub income_total: f64,
}

/// Groups spending by category.
///
/// Debit records whose category is not in `income_categories` accumulate
/// into the per-category mapping; credit records contribute to the scalar
/// income total instead. Accumulation is commutative, so the result does not
/// depend on record order beyond the first-seen entry order.
pub fn group_by_category(
    records: &[TransactionRecord],
    income_categories: &HashSet<String>,
) -> SpendBreakdown {
    let mut breakdown = SpendBreakdown::default();

    for record in records {
        match record.kind {
            TransactionType::Credit => breakdown.income_total += record.amount,
            TransactionType::Debit => {
                if !income_categories.contains(&record.category) {
                    breakdown.by_category.add(&record.category, record.amount);
                }
            }
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::config::DashboardConfig;

    fn create_test_record(
        id: &str,
        amount: f64,
        kind: TransactionType,
        category: &str,
        date: time::Date,
    ) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            amount,
            kind,
            category: category.to_string(),
            merchant: String::new(),
            date,
            description: None,
            balance: None,
        }
    }

    #[test]
    fn sums_debits_per_category() {
        let records = vec![
            create_test_record("1", 100.0, TransactionType::Debit, "Dining", date!(2025 - 10 - 01)),
            create_test_record("2", 50.0, TransactionType::Debit, "Dining", date!(2025 - 10 - 05)),
            create_test_record("3", 30.0, TransactionType::Debit, "Transport", date!(2025 - 10 - 12)),
        ];

        let breakdown = group_by_category(&records, &HashSet::new());

        assert_eq!(breakdown.by_category.amount_for("Dining"), Some(150.0));
        assert_eq!(breakdown.by_category.amount_for("Transport"), Some(30.0));
        assert_eq!(breakdown.income_total, 0.0);
    }

    #[test]
    fn income_categories_stay_out_of_the_spend_view() {
        let config = DashboardConfig::default();
        let records = vec![
            create_test_record("1", 850.0, TransactionType::Debit, "Dining", date!(2025 - 10 - 22)),
            create_test_record("2", 50000.0, TransactionType::Credit, "Salary", date!(2025 - 10 - 01)),
            // A debit categorized as income (e.g. a returned refund) is also
            // excluded from the spend mapping.
            create_test_record("3", 15.0, TransactionType::Debit, "Refund", date!(2025 - 10 - 02)),
        ];

        let breakdown = group_by_category(&records, &config.income_categories);

        assert_eq!(breakdown.by_category.len(), 1);
        assert_eq!(breakdown.by_category.amount_for("Dining"), Some(850.0));
        assert_eq!(breakdown.by_category.total(), 850.0);
        assert_eq!(breakdown.income_total, 50000.0);
    }

    #[test]
    fn spend_total_equals_non_income_debit_sum() {
        let config = DashboardConfig::default();
        let records = vec![
            create_test_record("1", 12.5, TransactionType::Debit, "Dining", date!(2025 - 01 - 03)),
            create_test_record("2", 87.5, TransactionType::Debit, "Utilities", date!(2025 - 02 - 11)),
            create_test_record("3", 9.99, TransactionType::Debit, "Dining", date!(2025 - 03 - 21)),
            create_test_record("4", 400.0, TransactionType::Credit, "Salary", date!(2025 - 01 - 01)),
            create_test_record("5", 3.0, TransactionType::Credit, "Dining", date!(2025 - 01 - 08)),
        ];

        let breakdown = group_by_category(&records, &config.income_categories);

        let debit_sum: f64 = records
            .iter()
            .filter(|record| {
                record.kind == TransactionType::Debit
                    && !config.income_categories.contains(&record.category)
            })
            .map(|record| record.amount)
            .sum();

        assert!((breakdown.by_category.total() - debit_sum).abs() < 1e-9);
    }

    #[test]
    fn entries_keep_first_seen_order() {
        let records = vec![
            create_test_record("1", 10.0, TransactionType::Debit, "Transport", date!(2025 - 10 - 01)),
            create_test_record("2", 10.0, TransactionType::Debit, "Dining", date!(2025 - 10 - 02)),
            create_test_record("3", 5.0, TransactionType::Debit, "Transport", date!(2025 - 10 - 03)),
        ];

        let breakdown = group_by_category(&records, &HashSet::new());
        let categories: Vec<&str> = breakdown
            .by_category
            .entries()
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();

        assert_eq!(categories, vec!["Transport", "Dining"]);
    }

    #[test]
    fn grouping_is_pure() {
        let config = DashboardConfig::default();
        let records = vec![
            create_test_record("1", 42.0, TransactionType::Debit, "Dining", date!(2025 - 10 - 01)),
            create_test_record("2", 7.0, TransactionType::Credit, "Salary", date!(2025 - 10 - 02)),
        ];

        let first = group_by_category(&records, &config.income_categories);
        let second = group_by_category(&records, &config.income_categories);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_breakdown() {
        let breakdown = group_by_category(&[], &HashSet::new());

        assert!(breakdown.by_category.is_empty());
        assert_eq!(breakdown.income_total, 0.0);
    }
}
