//! Configuration for the dashboard core.

use std::{collections::HashSet, time::Duration};

/// The number of months shown in the rolling monthly window.
pub const DEFAULT_WINDOW_MONTHS: usize = 6;

/// How long a session may sit idle before it is forcibly ended (10 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(600_000);

/// The cyclic palette used for pie segments, in slice order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "rgb(16, 185, 129)",
    "rgb(59, 130, 246)",
    "rgb(249, 115, 22)",
    "rgb(236, 72, 153)",
    "rgb(139, 92, 246)",
    "rgb(245, 158, 11)",
    "rgb(20, 184, 166)",
    "rgb(239, 68, 68)",
];

/// Categories that represent revenue rather than spending. These are kept
/// out of the spend-by-category view.
pub const DEFAULT_INCOME_CATEGORIES: [&str; 6] = [
    "Income",
    "Salary",
    "Freelance",
    "Bonus",
    "Refund",
    "Cashback",
];

/// The config that controls aggregation windows, income classification,
/// chart colors and the idle-session timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Category names classified as income rather than spending.
    pub income_categories: HashSet<String>,

    /// The length of the rolling monthly window, in calendar months.
    pub window_months: usize,

    /// The duration of user inactivity after which an active session is
    /// forcibly terminated.
    pub idle_timeout: Duration,

    /// Colors assigned cyclically to pie segments.
    pub palette: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            income_categories: DEFAULT_INCOME_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
            window_months: DEFAULT_WINDOW_MONTHS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|color| color.to_string())
                .collect(),
        }
    }
}
