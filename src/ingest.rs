//! Validation boundary for transactions arriving from the fetch collaborator.
//!
//! The transactions API hands over loosely-typed JSON. This module pins the
//! record schema down once, at the edge: every record either becomes a
//! [`TransactionRecord`] or lands on a skipped list with the reason it was
//! rejected. Bad individual records never abort the whole ingestion; only a
//! payload that is not a JSON array of records is a contract violation.

use serde::Deserialize;
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, transaction::TransactionRecord};

/// Calendar-date portion of the ISO-8601 timestamps the API emits.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The outcome of validating a batch of raw transaction records.
#[derive(Debug, Default, PartialEq)]
pub struct Ingested {
    /// Records that passed validation, in payload order.
    pub records: Vec<TransactionRecord>,
    /// Records that failed validation, with the reason each was rejected.
    pub skipped: Vec<SkippedRecord>,
}

/// A record that was excluded from all aggregates during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// The record's position in the incoming payload.
    pub index: usize,
    /// The record's ID, when one was present.
    pub id: Option<String>,
    /// Why the record was rejected.
    pub reason: SkipReason,
}

/// The reasons a raw transaction record can fail validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    /// The element could not be read as a transaction object at all.
    #[error("record is not a transaction object: {0}")]
    Malformed(String),

    /// A required field was absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The amount was negative. Direction is carried by `type`, so amounts
    /// must be non-negative.
    #[error("amount {0} is negative")]
    NegativeAmount(f64),

    /// The amount was NaN or infinite.
    #[error("amount is not a finite number")]
    NonFiniteAmount,

    /// The `type` field was neither `"credit"` nor `"debit"`.
    #[error("unrecognized transaction type {0:?}")]
    InvalidType(String),

    /// The transaction date could not be parsed as an ISO-8601 date.
    #[error("could not parse transaction date {0:?}")]
    InvalidDate(String),
}

/// The raw record shape as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    id: Option<String>,
    amount: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    category: Option<String>,
    merchant: Option<String>,
    transaction_date: Option<String>,
    description: Option<String>,
    balance: Option<f64>,
}

/// Parse a JSON payload from the transactions API into validated records.
///
/// # Errors
///
/// Returns [`Error::InvalidPayload`] if the payload is not a JSON array.
/// Individual records that fail validation do not produce an error; they are
/// collected in [`Ingested::skipped`].
pub fn parse_transactions(payload: &str) -> Result<Ingested, Error> {
    let values: Vec<Value> =
        serde_json::from_str(payload).map_err(|error| Error::InvalidPayload(error.to_string()))?;

    Ok(validate_records(values))
}

/// Validate an already-parsed JSON array of transaction records.
///
/// Each element is checked independently so that one bad record cannot take
/// down the rest of the batch.
pub fn validate_records(values: Vec<Value>) -> Ingested {
    let mut ingested = Ingested::default();

    for (index, value) in values.into_iter().enumerate() {
        match validate_record(&value) {
            Ok(record) => ingested.records.push(record),
            Err(reason) => {
                let id = value
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                tracing::debug!(index, ?id, %reason, "skipping transaction record");
                ingested.skipped.push(SkippedRecord { index, id, reason });
            }
        }
    }

    if !ingested.skipped.is_empty() {
        tracing::warn!(
            skipped = ingested.skipped.len(),
            accepted = ingested.records.len(),
            "some transaction records failed validation and were excluded"
        );
    }

    ingested
}

fn validate_record(value: &Value) -> Result<TransactionRecord, SkipReason> {
    let raw: RawTransaction = serde_json::from_value(value.clone())
        .map_err(|error| SkipReason::Malformed(error.to_string()))?;

    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(SkipReason::MissingField("id"))?;

    let amount = raw.amount.ok_or(SkipReason::MissingField("amount"))?;
    if !amount.is_finite() {
        return Err(SkipReason::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(SkipReason::NegativeAmount(amount));
    }

    let kind = match raw.kind.as_deref() {
        Some("credit") => crate::TransactionType::Credit,
        Some("debit") => crate::TransactionType::Debit,
        Some(other) => return Err(SkipReason::InvalidType(other.to_string())),
        None => return Err(SkipReason::MissingField("type")),
    };

    let category = raw
        .category
        .filter(|category| !category.trim().is_empty())
        .ok_or(SkipReason::MissingField("category"))?;

    let date_text = raw
        .transaction_date
        .ok_or(SkipReason::MissingField("transactionDate"))?;
    let date = parse_date(&date_text).ok_or_else(|| SkipReason::InvalidDate(date_text.clone()))?;

    Ok(TransactionRecord {
        id,
        amount,
        kind,
        category,
        merchant: raw.merchant.unwrap_or_default(),
        date,
        description: raw.description,
        balance: raw.balance,
    })
}

/// Parses the date portion of an ISO-8601 string, tolerating a trailing time
/// component (e.g. "2025-10-22T14:03:00Z").
fn parse_date(text: &str) -> Option<Date> {
    let date_part = text.get(..10)?;
    Date::parse(date_part, DATE_FORMAT).ok()
}
