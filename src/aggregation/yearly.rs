//! Calendar-year totals.

use crate::transaction::{TransactionRecord, TransactionType};

/// Sums the amounts of records in the given calendar year matching `kind`.
pub fn yearly_total(records: &[TransactionRecord], year: i32, kind: TransactionType) -> f64 {
    records
        .iter()
        .filter(|record| record.date.year() == year && record.kind == kind)
        .map(|record| record.amount)
        .sum()
}
