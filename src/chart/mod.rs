//! Pie-chart geometry for the spending-by-category view.
//!
//! The core emits segment descriptors (angles, SVG path, color index); the
//! presentation layer just renders them.

mod cache;
mod geometry;

pub use cache::SegmentCache;
pub use geometry::{PieSegment, build_segments};
