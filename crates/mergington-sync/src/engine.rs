//! Propagation of teacher and category changes into the activities that
//! embed them.
//!
//! Every operation re-reads what it needs from the store and writes each
//! affected activity back as its own whole-document save. There is no
//! atomicity across activities: when a save fails the error is returned at
//! once, activities already written stay written, and the rest stay stale
//! until the next trigger or sweep. Re-running any operation is safe.

use mergington_shared::{
    build_category_reference, build_teacher_reference, normalize_category_id, Category, Teacher,
    TeacherReference,
};
use mergington_store::{ActivityStore, CategoryStore, TeacherStore};
use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};

/// Outcome of [`SyncEngine::resync_all`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Activities visited.
    pub scanned: usize,
    /// Activities whose embedded data was rewritten.
    pub repaired: usize,
    /// Activities left untouched because a source record failed validation.
    pub skipped: usize,
}

/// The only writer of the embedded half of an activity.
pub struct SyncEngine<'s, A: ?Sized, T: ?Sized, C: ?Sized> {
    activities: &'s A,
    teachers: &'s T,
    categories: &'s C,
}

impl<'s, S> SyncEngine<'s, S, S, S>
where
    S: ActivityStore + TeacherStore + CategoryStore + ?Sized,
{
    /// Engine over a single store that holds all three collections.
    pub fn over(store: &'s S) -> Self {
        Self::new(store, store, store)
    }
}

impl<'s, A, T, C> SyncEngine<'s, A, T, C>
where
    A: ActivityStore + ?Sized,
    T: TeacherStore + ?Sized,
    C: CategoryStore + ?Sized,
{
    pub fn new(activities: &'s A, teachers: &'s T, categories: &'s C) -> Self {
        Self {
            activities,
            teachers,
            categories,
        }
    }

    /// Refresh the snapshot of `teacher` in every activity it is assigned to.
    /// Returns the number of activities written.
    pub fn sync_teacher_into_activities(&self, teacher: &Teacher) -> Result<usize> {
        let reference = build_teacher_reference(teacher)?;
        let affected = self.activities.list_activities_by_teacher(reference.username())?;

        let mut written = 0;
        for mut activity in affected {
            activity.embed_teacher(reference.clone());
            self.activities.save_activity(&activity)?;
            debug!(
                activity = %activity.name(),
                teacher = %reference.username(),
                "refreshed teacher snapshot"
            );
            written += 1;
        }

        info!(teacher = %reference.username(), written, "synced teacher into activities");
        Ok(written)
    }

    /// Refresh the snapshot of `category` in every activity pointing at it.
    /// Returns the number of activities written.
    pub fn sync_category_into_activities(&self, category: &Category) -> Result<usize> {
        let reference = build_category_reference(category)?;
        let affected = self.activities.list_activities_by_category(reference.id())?;

        let mut written = 0;
        for mut activity in affected {
            activity.embed_category(reference.clone());
            self.activities.save_activity(&activity)?;
            debug!(
                activity = %activity.name(),
                category = %reference.id(),
                "refreshed category snapshot"
            );
            written += 1;
        }

        info!(category = %reference.id(), written, "synced category into activities");
        Ok(written)
    }

    /// Strip `username` from the assigned keys and the snapshots of every
    /// activity. Blank input is a no-op.
    pub fn remove_teacher_from_activities(&self, username: &str) -> Result<usize> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        for mut activity in self.activities.list_activities()? {
            if activity.remove_teacher(username) {
                self.activities.save_activity(&activity)?;
                debug!(activity = %activity.name(), teacher = %username, "removed teacher");
                written += 1;
            }
        }

        info!(teacher = %username, written, "removed teacher from activities");
        Ok(written)
    }

    /// Clear the category key and snapshot of every activity pointing at
    /// `category_id`. Blank input is a no-op.
    pub fn remove_category_from_activities(&self, category_id: &str) -> Result<usize> {
        let Some(category_id) = normalize_category_id(category_id) else {
            return Ok(0);
        };

        let mut written = 0;
        for mut activity in self.activities.list_activities_by_category(&category_id)? {
            activity.clear_category();
            self.activities.save_activity(&activity)?;
            debug!(activity = %activity.name(), category = %category_id, "removed category");
            written += 1;
        }

        info!(category = %category_id, written, "removed category from activities");
        Ok(written)
    }

    /// Rebuild every embedded reference of one activity from current source
    /// records, saving once if anything differs.
    ///
    /// A missing activity is a no-op. A missing category leaves the key and
    /// any old snapshot in place. A missing teacher is left out of the
    /// rebuilt snapshot list but keeps its username, until
    /// [`remove_teacher_from_activities`](Self::remove_teacher_from_activities)
    /// runs for it. Returns `true` if the activity was written.
    pub fn resync_activity(&self, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let Some(mut activity) = self.activities.get_activity(name)? else {
            debug!(activity = %name, "activity gone, nothing to resync");
            return Ok(false);
        };

        let mut changed = false;

        if let Some(category_id) = activity.category_id().map(str::to_owned) {
            match self.categories.get_category(&category_id)? {
                Some(category) => {
                    let fresh = build_category_reference(&category)?;
                    let current = activity.category().is_some_and(|c| c.same_snapshot(&fresh));
                    if !current {
                        activity.embed_category(fresh);
                        changed = true;
                    }
                }
                None => {
                    debug!(activity = %name, category = %category_id, "category missing, keeping key");
                }
            }
        }

        let mut rebuilt = Vec::with_capacity(activity.assigned_teacher_usernames().len());
        for username in activity.assigned_teacher_usernames() {
            match self.teachers.get_teacher(username)? {
                Some(teacher) => rebuilt.push(build_teacher_reference(&teacher)?),
                None => {
                    debug!(activity = %name, teacher = %username, "teacher missing, keeping key");
                }
            }
        }
        if !same_snapshots(activity.assigned_teachers(), &rebuilt) {
            activity.replace_teacher_references(rebuilt);
            changed = true;
        }

        if changed {
            self.activities.save_activity(&activity)?;
            debug!(activity = %name, "resynced activity");
        }
        Ok(changed)
    }

    /// [`resync_activity`](Self::resync_activity) for every stored activity.
    ///
    /// An activity whose sources fail validation is logged and skipped; a
    /// store failure ends the sweep.
    pub fn resync_all(&self) -> Result<SweepReport> {
        let names: Vec<String> = self
            .activities
            .list_activities()?
            .into_iter()
            .map(|a| a.name().to_string())
            .collect();

        let mut report = SweepReport::default();
        for name in &names {
            report.scanned += 1;
            match self.resync_activity(name) {
                Ok(true) => report.repaired += 1,
                Ok(false) => {}
                Err(SyncError::Validation(e)) => {
                    warn!(activity = %name, error = %e, "skipping activity with invalid source record");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            scanned = report.scanned,
            repaired = report.repaired,
            skipped = report.skipped,
            "resync sweep finished"
        );
        Ok(report)
    }
}

fn same_snapshots(current: &[TeacherReference], rebuilt: &[TeacherReference]) -> bool {
    current.len() == rebuilt.len() && current.iter().zip(rebuilt).all(|(a, b)| a.same_snapshot(b))
}
