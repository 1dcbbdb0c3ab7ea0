//! [`CategoryStore`] for [`Database`].

use mergington_shared::Category;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::repository::CategoryStore;

const SELECT_COLUMNS: &str = "SELECT id, label, background_color, text_color, description, active
     FROM categories";

impl CategoryStore for Database {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], row_to_category)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    fn list_active_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SELECT_COLUMNS} WHERE active = 1 ORDER BY id ASC"))?;
        let rows = stmt.query_map([], row_to_category)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let category = self
            .conn()
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    fn save_category(&self, category: &Category) -> Result<Category> {
        self.conn().execute(
            "INSERT INTO categories (id, label, background_color, text_color, description, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 label            = excluded.label,
                 background_color = excluded.background_color,
                 text_color       = excluded.text_color,
                 description      = excluded.description,
                 active           = excluded.active",
            params![
                category.id,
                category.label,
                category.background_color,
                category.text_color,
                category.description,
                category.active as i32,
            ],
        )?;
        Ok(category.clone())
    }

    fn delete_category(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn category_exists(&self, id: &str) -> Result<bool> {
        let found = self
            .conn()
            .query_row("SELECT 1 FROM categories WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    let active_int: i32 = row.get(5)?;

    Ok(Category {
        id: row.get(0)?,
        label: row.get(1)?,
        background_color: row.get(2)?,
        text_color: row.get(3)?,
        description: row.get(4)?,
        active: active_int != 0,
    })
}
