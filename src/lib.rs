//! Finboard is the computational core of a personal-finance dashboard.
//!
//! The presentation layer, HTTP transport, token issuance and storage are
//! external collaborators. This crate consumes already-parsed transaction
//! records and an authentication-state signal, and produces:
//!
//! - category, monthly and yearly aggregates ([`aggregation`], [`rollup`]),
//! - pie-chart geometry ready for an SVG renderer ([`chart`]),
//! - session-expiry events driven by an idle timeout ([`session`]).
//!
//! Transactions enter through the [`ingest`] boundary, which validates the
//! loosely-typed records coming off the wire. Everything downstream of that
//! boundary works with [`transaction::TransactionRecord`] values and never
//! re-validates field shapes.

#![warn(missing_docs)]

pub mod aggregation;
pub mod chart;
pub mod config;
pub mod ingest;
pub mod rollup;
pub mod session;
pub mod transaction;

pub use config::DashboardConfig;
pub use ingest::{Ingested, SkipReason, SkippedRecord, parse_transactions};
pub use transaction::{TransactionRecord, TransactionType};

/// The errors that may occur in the dashboard core.
///
/// Per-record validation problems are deliberately not represented here:
/// those are recovered locally at the ingest boundary and reported through
/// [`ingest::SkippedRecord`] instead of aborting the whole operation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction payload as a whole violated the ingestion contract,
    /// e.g. the body was not a JSON array of records.
    #[error("could not parse transaction payload: {0}")]
    InvalidPayload(String),

    /// The UI-event collaborator could not register the activity listeners
    /// for the session monitor.
    ///
    /// This error is non-fatal to the session: the monitor logs it and
    /// treats the session as always active until a later registration
    /// attempt succeeds.
    #[error("could not register activity listeners: {0}")]
    ListenerRegistration(String),
}
