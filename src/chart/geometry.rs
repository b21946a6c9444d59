//! Converts a category summary into ordered pie-slice descriptors.

use serde::Serialize;

use crate::aggregation::CategorySummary;

/// Center of the 100x100 SVG viewbox the paths are expressed in.
const CENTER: f64 = 50.0;
/// Radius of the pie circle within that viewbox.
const RADIUS: f64 = 40.0;
/// Slices start at 12 o'clock and sweep clockwise.
const START_ANGLE_DEG: f64 = -90.0;

/// Geometric descriptor for one slice of the category pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    /// The spending category this slice represents.
    pub category: String,
    /// The accumulated amount for the category.
    pub amount: f64,
    /// The slice's share of the total, in percent.
    pub percentage: f64,
    /// Where the slice begins, in degrees from 12 o'clock minus 90.
    pub start_angle_deg: f64,
    /// Where the slice ends, in degrees.
    pub end_angle_deg: f64,
    /// An SVG path drawing the slice in a 100x100 viewbox.
    pub path: String,
    /// Index into the configured color palette.
    pub color_index: usize,
}

/// Builds the ordered pie segments for a category summary.
///
/// Segments are sorted by descending amount with ties broken by first-seen
/// order, zero-amount categories are dropped, and each slice's angular span
/// is computed from its own percentage so rounding never compounds across
/// the circle. The total defaults to the sum of the summary values;
/// `total_override` replaces it for callers whose denominator must differ
/// from the literal sum.
///
/// A total of zero yields an empty list; the caller renders an explicit
/// "no data" state instead of a chart.
pub fn build_segments(
    summary: &CategorySummary,
    palette_size: usize,
    total_override: Option<f64>,
) -> Vec<PieSegment> {
    let total = total_override.unwrap_or_else(|| summary.total());
    if total <= 0.0 {
        return Vec::new();
    }

    let mut entries: Vec<_> = summary
        .entries()
        .iter()
        .filter(|entry| entry.amount > 0.0)
        .collect();
    // Stable sort keeps first-seen order between equal amounts.
    entries.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let palette_size = palette_size.max(1);
    let mut cursor = START_ANGLE_DEG;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let percentage = entry.amount / total * 100.0;
            let span = percentage / 100.0 * 360.0;
            let start_angle_deg = cursor;
            let end_angle_deg = start_angle_deg + span;
            cursor = end_angle_deg;

            // A single entry only degenerates to the full circle when its
            // span actually covers it, which an overriding total can prevent.
            let path = if (span - 360.0).abs() <= 1e-6 {
                full_circle_path()
            } else {
                arc_path(start_angle_deg, end_angle_deg)
            };

            PieSegment {
                category: entry.category.clone(),
                amount: entry.amount,
                percentage,
                start_angle_deg,
                end_angle_deg,
                path,
                color_index: index % palette_size,
            }
        })
        .collect()
}

fn point_on_circle(angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();

    (
        CENTER + RADIUS * radians.cos(),
        CENTER + RADIUS * radians.sin(),
    )
}

/// A wedge from the center out to the arc between the two boundary angles.
fn arc_path(start_deg: f64, end_deg: f64) -> String {
    let (x1, y1) = point_on_circle(start_deg);
    let (x2, y2) = point_on_circle(end_deg);
    let large_arc = if end_deg - start_deg > 180.0 { 1 } else { 0 };

    format!(
        "M {CENTER} {CENTER} L {x1:.4} {y1:.4} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.4} {y2:.4} Z"
    )
}

/// A single arc cannot span the full 360 degrees, so the degenerate
/// one-category chart is drawn as two semicircles.
fn full_circle_path() -> String {
    let left = CENTER - RADIUS;
    let right = CENTER + RADIUS;

    format!(
        "M {left} {CENTER} A {RADIUS} {RADIUS} 0 1 1 {right} {CENTER} A {RADIUS} {RADIUS} 0 1 1 {left} {CENTER} Z"
    )
}
