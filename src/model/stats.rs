//! Statistics value types.
//!
//! These are the shapes the progress views render. [`ProjectStats`] is
//! `Default`-constructible because the statistics engine collapses to the
//! empty shape on storage failure instead of propagating an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Roll-up for one category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Items in the category.
    pub total: i64,

    /// Completed items in the category.
    pub completed: i64,

    /// Completion percentage, rounded to one decimal place.
    pub percentage: f64,
}

/// Completions on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Day in `YYYY-MM-DD` form (UTC).
    pub date: String,

    /// Items completed on that day.
    pub completed: i64,
}

/// Full progress snapshot for a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Per-category roll-ups, keyed by category label, sorted.
    pub category_stats: BTreeMap<String, CategoryStats>,

    /// All items in the project.
    pub total_tasks: i64,

    /// Completed items in the project.
    pub completed_tasks: i64,

    /// `total_tasks - completed_tasks`.
    pub pending_tasks: i64,

    /// Overall completion percentage, rounded to one decimal place;
    /// `0.0` for an empty project.
    pub overall_percentage: f64,

    /// Items completed within the last 7 days.
    pub recent_activity: i64,

    /// Per-day completion counts for the last 30 days, ascending and
    /// sparse (days without completions are absent).
    pub completion_trend: Vec<TrendPoint>,
}
