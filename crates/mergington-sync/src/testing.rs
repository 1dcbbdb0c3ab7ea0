//! Fixtures shared by the unit tests in this crate.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::NaiveTime;
use mergington_shared::{Activity, Category, Role, ScheduleDetails, Teacher};
use mergington_store::{ActivityStore, CategoryStore, Database, Result, StoreError, TeacherStore};

pub fn open_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("test.db")).unwrap();
    (dir, db)
}

pub fn jose() -> Teacher {
    Teacher::new("jose", "Prof. Jose Chen", "pw", Some(Role::Teacher)).unwrap()
}

pub fn maria() -> Teacher {
    Teacher::new("maria", "Maria Rodriguez", "pw", Some(Role::Teacher)).unwrap()
}

pub fn academic() -> Category {
    Category::new("academic", "Acadêmico", "#007bff", "#ffffff", Some("Estudos".into())).unwrap()
}

pub fn arts() -> Category {
    Category::new("arts", "Artes", "#6f42c1", "#ffffff", None).unwrap()
}

pub fn schedule(days: &[&str], start: (u32, u32), end: (u32, u32)) -> ScheduleDetails {
    ScheduleDetails::new(
        days.iter().map(|d| d.to_string()).collect(),
        NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
    )
    .unwrap()
}

/// Key-only activity: nothing embedded.
pub fn activity(name: &str, category_id: Option<&str>, teachers: &[&str]) -> Activity {
    let mut activity = Activity::new(
        name,
        "Test activity",
        schedule(&["Tuesday", "Thursday"], (15, 30), (17, 0)),
        20,
        category_id,
    )
    .unwrap();
    for username in teachers {
        activity.assign_teacher(username);
    }
    activity
}

pub fn chess_club(category_id: Option<&str>, teachers: &[&str]) -> Activity {
    activity("Chess Club", category_id, teachers)
}

/// Delegates to a [`Database`] but fails `save_activity` for chosen names,
/// and records which names were saved.
pub struct FlakyStore<'a> {
    pub inner: &'a Database,
    pub fail_saves_for: HashSet<String>,
    pub saved: RefCell<Vec<String>>,
}

impl<'a> FlakyStore<'a> {
    pub fn new(inner: &'a Database, fail_saves_for: &[&str]) -> Self {
        Self {
            inner,
            fail_saves_for: fail_saves_for.iter().map(|s| s.to_string()).collect(),
            saved: RefCell::new(Vec::new()),
        }
    }
}

fn busy() -> StoreError {
    StoreError::Sqlite(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
        Some("database is locked".into()),
    ))
}

impl ActivityStore for FlakyStore<'_> {
    fn list_activities(&self) -> Result<Vec<Activity>> {
        self.inner.list_activities()
    }

    fn get_activity(&self, name: &str) -> Result<Option<Activity>> {
        self.inner.get_activity(name)
    }

    fn list_activities_by_category(&self, category_id: &str) -> Result<Vec<Activity>> {
        self.inner.list_activities_by_category(category_id)
    }

    fn list_activities_by_day(&self, day: &str) -> Result<Vec<Activity>> {
        self.inner.list_activities_by_day(day)
    }

    fn list_activities_by_time_range(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<Activity>> {
        self.inner.list_activities_by_time_range(start, end)
    }

    fn list_activities_by_day_and_time_range(
        &self,
        day: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Activity>> {
        self.inner.list_activities_by_day_and_time_range(day, start, end)
    }

    fn list_activity_days(&self) -> Result<Vec<String>> {
        self.inner.list_activity_days()
    }

    fn save_activity(&self, activity: &Activity) -> Result<Activity> {
        if self.fail_saves_for.contains(activity.name()) {
            return Err(busy());
        }
        self.saved.borrow_mut().push(activity.name().to_string());
        self.inner.save_activity(activity)
    }

    fn delete_activity(&self, name: &str) -> Result<bool> {
        self.inner.delete_activity(name)
    }

    fn activity_exists(&self, name: &str) -> Result<bool> {
        self.inner.activity_exists(name)
    }
}

impl TeacherStore for FlakyStore<'_> {
    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.inner.list_teachers()
    }

    fn get_teacher(&self, username: &str) -> Result<Option<Teacher>> {
        self.inner.get_teacher(username)
    }

    fn save_teacher(&self, teacher: &Teacher) -> Result<Teacher> {
        self.inner.save_teacher(teacher)
    }

    fn delete_teacher(&self, username: &str) -> Result<bool> {
        self.inner.delete_teacher(username)
    }

    fn teacher_exists(&self, username: &str) -> Result<bool> {
        self.inner.teacher_exists(username)
    }
}

impl CategoryStore for FlakyStore<'_> {
    fn list_categories(&self) -> Result<Vec<Category>> {
        self.inner.list_categories()
    }

    fn list_active_categories(&self) -> Result<Vec<Category>> {
        self.inner.list_active_categories()
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.inner.get_category(id)
    }

    fn save_category(&self, category: &Category) -> Result<Category> {
        self.inner.save_category(category)
    }

    fn delete_category(&self, id: &str) -> Result<bool> {
        self.inner.delete_category(id)
    }

    fn category_exists(&self, id: &str) -> Result<bool> {
        self.inner.category_exists(id)
    }
}
