//! Aggregation primitives over validated transaction records.
//!
//! Everything in this module is pure and synchronous: the functions borrow
//! the caller's records read-only, hold no state between calls, and are safe
//! to call repeatedly with identical results.

mod category;
mod monthly;
mod yearly;

pub use category::{CategorySummary, CategoryTotal, SpendBreakdown, group_by_category};
pub use monthly::{MonthlyBucket, bucket_by_month};
pub use yearly::yearly_total;
