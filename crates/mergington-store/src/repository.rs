//! Collection contracts for the three record types.
//!
//! Consumers (the sync engine, the services) depend on these traits rather
//! than on [`Database`](crate::Database), so tests can wrap or replace the
//! store. Lookups that find nothing return `None` or an empty `Vec`; an
//! `Err` always means the store itself failed.

use chrono::NaiveTime;
use mergington_shared::{Activity, Category, Teacher};

use crate::error::Result;

pub trait ActivityStore {
    fn list_activities(&self) -> Result<Vec<Activity>>;

    fn get_activity(&self, name: &str) -> Result<Option<Activity>>;

    fn list_activities_by_category(&self, category_id: &str) -> Result<Vec<Activity>>;

    fn list_activities_by_day(&self, day: &str) -> Result<Vec<Activity>>;

    /// Activities whose whole meeting fits inside `[start, end]`.
    fn list_activities_by_time_range(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<Activity>>;

    fn list_activities_by_day_and_time_range(
        &self,
        day: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Activity>>;

    /// Every distinct meeting day, sorted.
    fn list_activity_days(&self) -> Result<Vec<String>>;

    /// Insert or replace the whole document keyed by `activity.name()`.
    fn save_activity(&self, activity: &Activity) -> Result<Activity>;

    /// Returns `true` if a record was deleted.
    fn delete_activity(&self, name: &str) -> Result<bool>;

    fn activity_exists(&self, name: &str) -> Result<bool>;

    /// Activities that list `username` among their assigned teachers.
    ///
    /// No index on assigned usernames is assumed, so the default scans every
    /// activity and filters in memory.
    fn list_activities_by_teacher(&self, username: &str) -> Result<Vec<Activity>> {
        let mut activities = self.list_activities()?;
        activities.retain(|a| a.is_teacher_assigned(username));
        Ok(activities)
    }
}

pub trait TeacherStore {
    fn list_teachers(&self) -> Result<Vec<Teacher>>;

    fn get_teacher(&self, username: &str) -> Result<Option<Teacher>>;

    fn save_teacher(&self, teacher: &Teacher) -> Result<Teacher>;

    fn delete_teacher(&self, username: &str) -> Result<bool>;

    fn teacher_exists(&self, username: &str) -> Result<bool>;
}

pub trait CategoryStore {
    fn list_categories(&self) -> Result<Vec<Category>>;

    fn list_active_categories(&self) -> Result<Vec<Category>>;

    fn get_category(&self, id: &str) -> Result<Option<Category>>;

    fn save_category(&self, category: &Category) -> Result<Category>;

    fn delete_category(&self, id: &str) -> Result<bool>;

    fn category_exists(&self, id: &str) -> Result<bool>;
}
