use std::collections::BTreeMap;

use mergington_shared::{normalize_category_id, Category};
use mergington_store::{ActivityStore, CategoryStore, TeacherStore};
use tracing::{info, warn};

use crate::engine::SyncEngine;
use crate::error::{ServiceError, ServiceResult};

/// Category management. Deactivation is the normal way to retire a
/// category and leaves activities pointing at it; hard deletion clears it
/// from them.
pub struct CategoryService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> CategoryService<'s, S>
where
    S: ActivityStore + TeacherStore + CategoryStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Active categories keyed by id.
    pub fn active_categories(&self) -> ServiceResult<BTreeMap<String, Category>> {
        Ok(self
            .store
            .list_active_categories()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect())
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.store.list_categories()?)
    }

    pub fn get_category(&self, code: &str) -> ServiceResult<Option<Category>> {
        match normalize_category_id(code) {
            Some(id) => Ok(self.store.get_category(&id)?),
            None => Ok(None),
        }
    }

    /// Create or update a category (re-activating it), then refresh its
    /// snapshot in every activity that points at it.
    pub fn save_category(
        &self,
        code: &str,
        label: &str,
        background_color: &str,
        text_color: &str,
        description: Option<String>,
    ) -> ServiceResult<Category> {
        let category = Category::new(code, label, background_color, text_color, description)?;
        let saved = self.store.save_category(&category)?;
        let synced = SyncEngine::over(self.store).sync_category_into_activities(&saved)?;
        info!(category = %saved.id, activities = synced, "saved category");
        Ok(saved)
    }

    /// Soft-disable a category. Activities keep both the key and the
    /// snapshot.
    pub fn deactivate_category(&self, code: &str) -> ServiceResult<Category> {
        let Some(mut category) = self.get_category(code)? else {
            return Err(ServiceError::NotFound {
                kind: "category",
                key: code.trim().to_string(),
            });
        };
        category.deactivate();
        let saved = self.store.save_category(&category)?;
        SyncEngine::over(self.store).sync_category_into_activities(&saved)?;
        info!(category = %saved.id, "deactivated category");
        Ok(saved)
    }

    /// Hard-delete a category and clear it from every activity. The clear
    /// runs even when no category row existed, to catch dangling keys.
    /// Returns the number of activities rewritten.
    pub fn delete_category(&self, code: &str) -> ServiceResult<usize> {
        let Some(id) = normalize_category_id(code) else {
            return Err(ServiceError::InvalidArgument("category id must not be blank".into()));
        };
        if !self.store.delete_category(&id)? {
            warn!(category = %id, "no category row to delete, clearing references anyway");
        }
        let cleared = SyncEngine::over(self.store).remove_category_from_activities(&id)?;
        info!(category = %id, activities = cleared, "deleted category");
        Ok(cleared)
    }
}
