//! The transaction domain model shared by every aggregation operation.

use serde::{Deserialize, Serialize};
use time::Date;

/// Whether a transaction moved money into or out of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received (income).
    Credit,
    /// Money spent (expense).
    Debit,
}

/// A validated transaction record.
///
/// Records are produced by the [`crate::ingest`] boundary and are immutable
/// from then on: the aggregation and chart modules borrow them read-only and
/// hold no state between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Unique, stable identifier assigned by the transactions API.
    pub id: String,
    /// The amount of money moved. Always finite and non-negative; the
    /// direction comes from `kind`.
    pub amount: f64,
    /// Whether this was income or spending.
    pub kind: TransactionType,
    /// The spending (or income) category, e.g. "Dining" or "Salary".
    pub category: String,
    /// The counterparty, e.g. "Corner Cafe". May be empty when the upstream
    /// extraction could not determine one.
    pub merchant: String,
    /// The calendar date the transaction happened.
    pub date: Date,
    /// Free-form description, when the upstream extraction provided one.
    pub description: Option<String>,
    /// The account balance after this transaction, when known.
    pub balance: Option<f64>,
}
