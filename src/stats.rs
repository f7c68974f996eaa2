//! Read-side statistics: per-category roll-ups, overall progress, a
//! 7-day activity count, and a 30-day completion trend.
//!
//! Storage failures are logged at `warn!` and collapse to the empty
//! shape; callers of the public API never see an error.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::warn;

use crate::error::Result;
use crate::model::{CategoryStats, ProjectId, ProjectStats, TrendPoint};
use crate::storage::Database;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Read-only statistics over a project's checklist, bound to one store.
#[derive(Clone)]
pub struct StatsEngine {
    db: Database,
}

impl StatsEngine {
    /// Create an engine over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Full progress snapshot for a project.
    ///
    /// Infallible: a storage failure is logged and the empty snapshot is
    /// returned. An unknown or empty project also yields the empty
    /// snapshot, with `overall_percentage` pinned to `0.0` rather than a
    /// division by zero.
    #[must_use]
    pub fn project_stats(&self, project_id: ProjectId) -> ProjectStats {
        match self.load_stats(project_id) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(project_id, error = %err, "stats unavailable, serving empty snapshot");
                ProjectStats::default()
            }
        }
    }

    /// Per-day completion counts over the last 30 days, ascending by day.
    ///
    /// Days without completions are absent from the result. Infallible:
    /// a storage failure is logged and an empty trend is returned.
    #[must_use]
    pub fn completion_trend(&self, project_id: ProjectId) -> Vec<TrendPoint> {
        match self.load_trend(project_id) {
            Ok(trend) => trend,
            Err(err) => {
                warn!(project_id, error = %err, "trend unavailable, serving empty trend");
                Vec::new()
            }
        }
    }

    fn load_stats(&self, project_id: ProjectId) -> Result<ProjectStats> {
        let rollup: Vec<(String, i64, i64)> = self.db.query_rows(
            "SELECT category,
                    COUNT(*),
                    SUM(CASE WHEN is_completed = 1 THEN 1 ELSE 0 END)
             FROM checklist_items
             WHERE project_id = ?1
             GROUP BY category
             ORDER BY category",
            rusqlite::params![project_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let mut category_stats = BTreeMap::new();
        let mut total_tasks = 0;
        let mut completed_tasks = 0;
        for (category, total, completed) in rollup {
            total_tasks += total;
            completed_tasks += completed;
            category_stats.insert(
                category,
                CategoryStats {
                    total,
                    completed,
                    percentage: percentage(completed, total),
                },
            );
        }

        let week_ago = Utc::now().timestamp_millis() - 7 * DAY_MS;
        let recent_activity = self
            .db
            .query_row_opt(
                "SELECT COUNT(*) FROM checklist_items
                 WHERE project_id = ?1 AND is_completed = 1 AND completed_date >= ?2",
                rusqlite::params![project_id, week_ago],
                |row| row.get(0),
            )?
            .unwrap_or(0);

        Ok(ProjectStats {
            category_stats,
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            overall_percentage: percentage(completed_tasks, total_tasks),
            recent_activity,
            // A trend failure degrades to an empty trend without
            // discarding the rest of the snapshot.
            completion_trend: self.completion_trend(project_id),
        })
    }

    fn load_trend(&self, project_id: ProjectId) -> Result<Vec<TrendPoint>> {
        let month_ago = Utc::now().timestamp_millis() - 30 * DAY_MS;
        self.db.query_rows(
            "SELECT date(completed_date / 1000, 'unixepoch') AS day, COUNT(*)
             FROM checklist_items
             WHERE project_id = ?1 AND is_completed = 1 AND completed_date >= ?2
             GROUP BY day
             ORDER BY day",
            rusqlite::params![project_id, month_ago],
            |row| {
                Ok(TrendPoint {
                    date: row.get(0)?,
                    completed: row.get(1)?,
                })
            },
        )
    }
}

/// `completed / total` as a percentage rounded to one decimal place;
/// `0.0` when `total` is zero.
fn percentage(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = completed as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthService;
    use crate::checklist::ChecklistRepository;
    use crate::model::ItemId;
    use crate::projects::ProjectRepository;

    /// Route `warn!` output through the test harness when `RUST_LOG` asks
    /// for it.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn setup() -> (Database, ProjectId, ChecklistRepository, StatsEngine) {
        let db = Database::open_memory().unwrap();
        let user_id = AuthService::new(db.clone())
            .register("a@b.com", "secret1")
            .unwrap();
        let project_id = ProjectRepository::new(db.clone())
            .create(user_id, "Fall Play", "")
            .unwrap();
        let items = ChecklistRepository::new(db.clone());
        let stats = StatsEngine::new(db.clone());
        (db, project_id, items, stats)
    }

    /// Completes the first `n` items in listing order and returns their ids.
    fn complete_first(items: &ChecklistRepository, project_id: ProjectId, n: usize) -> Vec<ItemId> {
        let ids: Vec<ItemId> = items
            .list_items(project_id, None)
            .unwrap()
            .iter()
            .take(n)
            .map(|item| item.id)
            .collect();
        for &id in &ids {
            items.set_completion(id, project_id, true).unwrap();
        }
        ids
    }

    #[test]
    fn test_percentage_rounding() {
        assert!((percentage(1, 3) - 33.3).abs() < f64::EPSILON);
        assert!((percentage(2, 3) - 66.7).abs() < f64::EPSILON);
        assert!((percentage(10, 37) - 27.0).abs() < f64::EPSILON);
        assert!((percentage(5, 5) - 100.0).abs() < f64::EPSILON);
        assert!(percentage(0, 0).abs() < f64::EPSILON);
        assert!(percentage(0, 37).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_project_rollup() {
        let (_db, project_id, items, stats) = setup();
        complete_first(&items, project_id, 10);

        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.total_tasks, 37);
        assert_eq!(snapshot.completed_tasks, 10);
        assert_eq!(snapshot.pending_tasks, 27);
        assert!((snapshot.overall_percentage - 27.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.recent_activity, 10);
        assert_eq!(snapshot.category_stats.len(), 7);

        // All ten completions land in today's trend bucket
        assert_eq!(snapshot.completion_trend.len(), 1);
        assert_eq!(snapshot.completion_trend[0].completed, 10);

        // A custom item widens the roll-up, deleting it narrows it back
        let custom_id = items
            .add_custom_item(project_id, "Props", "Source prop swords", None)
            .unwrap();
        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.total_tasks, 38);
        assert_eq!(snapshot.category_stats["Props"].total, 1);

        items.delete_custom_item(custom_id, project_id).unwrap();
        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.total_tasks, 37);
        assert!(!snapshot.category_stats.contains_key("Props"));
    }

    #[test]
    fn test_category_rollup_percentages() {
        let (_db, project_id, items, stats) = setup();

        for item in items.list_items(project_id, Some("Lighting")).unwrap() {
            items.set_completion(item.id, project_id, true).unwrap();
        }
        let sound = items.list_items(project_id, Some("Sound")).unwrap();
        items.set_completion(sound[0].id, project_id, true).unwrap();

        let snapshot = stats.project_stats(project_id);

        let lighting = &snapshot.category_stats["Lighting"];
        assert_eq!(lighting.total, 5);
        assert_eq!(lighting.completed, 5);
        assert!((lighting.percentage - 100.0).abs() < f64::EPSILON);

        let sound = &snapshot.category_stats["Sound"];
        assert_eq!(sound.completed, 1);
        assert!((sound.percentage - 20.0).abs() < f64::EPSILON);

        let costumes = &snapshot.category_stats["Costumes"];
        assert_eq!(costumes.completed, 0);
        assert!(costumes.percentage.abs() < f64::EPSILON);

        assert_eq!(snapshot.completed_tasks, 6);
    }

    #[test]
    fn test_unknown_project_is_empty_not_error() {
        let (_db, _project_id, _items, stats) = setup();

        let snapshot = stats.project_stats(9999);
        assert_eq!(snapshot.total_tasks, 0);
        assert_eq!(snapshot.pending_tasks, 0);
        assert!(snapshot.overall_percentage.abs() < f64::EPSILON);
        assert!(snapshot.category_stats.is_empty());
        assert!(snapshot.completion_trend.is_empty());
    }

    #[test]
    fn test_recent_activity_window() {
        let (db, project_id, items, stats) = setup();
        let ids = complete_first(&items, project_id, 3);

        // Push one completion out of the 7-day window
        let old = Utc::now().timestamp_millis() - 10 * DAY_MS;
        db.execute(
            "UPDATE checklist_items SET completed_date = ?1 WHERE id = ?2",
            rusqlite::params![old, ids[0]],
        )
        .unwrap();

        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.completed_tasks, 3);
        assert_eq!(snapshot.recent_activity, 2);
    }

    #[test]
    fn test_completion_trend_buckets_and_window() {
        let (db, project_id, items, stats) = setup();
        let ids = complete_first(&items, project_id, 4);

        let now = Utc::now().timestamp_millis();
        // Two completions moved two days back, one beyond the 30-day window
        db.execute(
            "UPDATE checklist_items SET completed_date = ?1 WHERE id IN (?2, ?3)",
            rusqlite::params![now - 2 * DAY_MS, ids[0], ids[1]],
        )
        .unwrap();
        db.execute(
            "UPDATE checklist_items SET completed_date = ?1 WHERE id = ?2",
            rusqlite::params![now - 40 * DAY_MS, ids[2]],
        )
        .unwrap();

        let trend = stats.completion_trend(project_id);
        assert_eq!(trend.len(), 2);
        assert!(trend[0].date < trend[1].date);
        assert_eq!(trend[0].completed, 2);
        assert_eq!(trend[1].completed, 1);

        // The aged-out completion still counts toward totals
        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.completed_tasks, 4);
        assert_eq!(snapshot.recent_activity, 3);
    }

    #[test]
    fn test_storage_failure_collapses_to_empty() {
        init_tracing();
        let (db, project_id, items, stats) = setup();
        complete_first(&items, project_id, 5);

        db.execute("DROP TABLE checklist_items", rusqlite::params![])
            .unwrap();

        let snapshot = stats.project_stats(project_id);
        assert_eq!(snapshot.total_tasks, 0);
        assert!(snapshot.category_stats.is_empty());
        assert!(stats.completion_trend(project_id).is_empty());
    }
}
