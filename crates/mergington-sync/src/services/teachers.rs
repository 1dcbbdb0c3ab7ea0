use mergington_shared::{Role, Teacher};
use mergington_store::{ActivityStore, CategoryStore, TeacherStore};
use tracing::info;

use crate::engine::SyncEngine;
use crate::error::{ServiceError, ServiceResult};

pub struct TeacherService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> TeacherService<'s, S>
where
    S: ActivityStore + TeacherStore + CategoryStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn list_teachers(&self) -> ServiceResult<Vec<Teacher>> {
        Ok(self.store.list_teachers()?)
    }

    /// Blank usernames find nothing.
    pub fn get_teacher(&self, username: &str) -> ServiceResult<Option<Teacher>> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(None);
        }
        Ok(self.store.get_teacher(username)?)
    }

    /// Create or update a teacher, then refresh its snapshot everywhere it
    /// is assigned.
    ///
    /// On update the display name is always replaced, the password only when
    /// a non-blank one is given, and the role only when one is given.
    pub fn save_teacher(
        &self,
        username: &str,
        display_name: &str,
        password: Option<&str>,
        role: Option<Role>,
    ) -> ServiceResult<Teacher> {
        let password = password.filter(|p| !p.trim().is_empty());

        let teacher = match self.get_teacher(username)? {
            Some(existing) => Teacher::new(
                &existing.username,
                display_name,
                password.unwrap_or(existing.password.as_str()),
                Some(role.unwrap_or(existing.role)),
            )?,
            None => Teacher::new(username, display_name, password.unwrap_or_default(), role)?,
        };

        let saved = self.store.save_teacher(&teacher)?;
        let synced = SyncEngine::over(self.store).sync_teacher_into_activities(&saved)?;
        info!(teacher = %saved.username, activities = synced, "saved teacher");
        Ok(saved)
    }

    /// Delete a teacher, then strip it from every activity. Returns the
    /// number of activities rewritten.
    pub fn delete_teacher(&self, username: &str) -> ServiceResult<usize> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::InvalidArgument("username must not be blank".into()));
        }
        if !self.store.delete_teacher(username)? {
            return Err(ServiceError::NotFound {
                kind: "teacher",
                key: username.to_string(),
            });
        }

        let removed = SyncEngine::over(self.store).remove_teacher_from_activities(username)?;
        info!(teacher = %username, activities = removed, "deleted teacher");
        Ok(removed)
    }
}
