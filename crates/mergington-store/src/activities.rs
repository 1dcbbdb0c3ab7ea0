//! [`ActivityStore`] for [`Database`].
//!
//! The `document` column holds the full activity as JSON and is the only
//! column read back. `category_id`, the schedule times, and `activity_days`
//! are write-side copies kept for filtering, rewritten on every save in the
//! same transaction as the document.

use chrono::NaiveTime;
use mergington_shared::constants::STORAGE_TIME_FORMAT;
use mergington_shared::Activity;
use rusqlite::{params, OptionalExtension, ToSql};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::repository::ActivityStore;

impl Database {
    fn query_activities(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Activity>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map(params, row_to_activity)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }
}

impl ActivityStore for Database {
    fn list_activities(&self) -> Result<Vec<Activity>> {
        self.query_activities("SELECT document FROM activities ORDER BY name ASC", &[])
    }

    fn get_activity(&self, name: &str) -> Result<Option<Activity>> {
        let activity = self
            .conn()
            .query_row(
                "SELECT document FROM activities WHERE name = ?1",
                params![name],
                row_to_activity,
            )
            .optional()?;
        Ok(activity)
    }

    fn list_activities_by_category(&self, category_id: &str) -> Result<Vec<Activity>> {
        self.query_activities(
            "SELECT document FROM activities WHERE category_id = ?1 ORDER BY name ASC",
            params![category_id],
        )
    }

    fn list_activities_by_day(&self, day: &str) -> Result<Vec<Activity>> {
        self.query_activities(
            "SELECT a.document
             FROM activities a
             JOIN activity_days d ON d.activity_name = a.name
             WHERE d.day = ?1
             ORDER BY a.name ASC",
            params![day],
        )
    }

    fn list_activities_by_time_range(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<Activity>> {
        self.query_activities(
            "SELECT document
             FROM activities
             WHERE start_time >= ?1 AND end_time <= ?2
             ORDER BY name ASC",
            params![time_column(start), time_column(end)],
        )
    }

    fn list_activities_by_day_and_time_range(
        &self,
        day: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Activity>> {
        self.query_activities(
            "SELECT a.document
             FROM activities a
             JOIN activity_days d ON d.activity_name = a.name
             WHERE d.day = ?1 AND a.start_time >= ?2 AND a.end_time <= ?3
             ORDER BY a.name ASC",
            params![day, time_column(start), time_column(end)],
        )
    }

    fn list_activity_days(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT DISTINCT day FROM activity_days ORDER BY day ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    fn save_activity(&self, activity: &Activity) -> Result<Activity> {
        let document = serde_json::to_string(activity)?;
        let schedule = activity.schedule_details();

        let tx = self.conn().unchecked_transaction()?;
        tx.execute(
            "INSERT INTO activities (name, category_id, start_time, end_time, document)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE SET
                 category_id = excluded.category_id,
                 start_time  = excluded.start_time,
                 end_time    = excluded.end_time,
                 document    = excluded.document",
            params![
                activity.name(),
                activity.category_id(),
                time_column(schedule.start_time()),
                time_column(schedule.end_time()),
                document,
            ],
        )?;
        tx.execute(
            "DELETE FROM activity_days WHERE activity_name = ?1",
            params![activity.name()],
        )?;
        for day in schedule.days() {
            tx.execute(
                "INSERT OR IGNORE INTO activity_days (activity_name, day) VALUES (?1, ?2)",
                params![activity.name(), day],
            )?;
        }
        tx.commit()?;

        tracing::trace!(activity = %activity.name(), "saved activity document");
        Ok(activity.clone())
    }

    // ON DELETE CASCADE: activity_days go with it
    fn delete_activity(&self, name: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM activities WHERE name = ?1", params![name])?;
        Ok(affected > 0)
    }

    fn activity_exists(&self, name: &str) -> Result<bool> {
        let found = self
            .conn()
            .query_row("SELECT 1 FROM activities WHERE name = ?1", params![name], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn time_column(time: NaiveTime) -> String {
    time.format(STORAGE_TIME_FORMAT).to_string()
}

/// Map a `rusqlite::Row` holding a `document` column to an [`Activity`].
fn row_to_activity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Activity> {
    let document: String = row.get(0)?;
    serde_json::from_str(&document).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
