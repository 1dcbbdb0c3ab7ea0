//! [`TeacherStore`] for [`Database`].

use mergington_shared::{Role, Teacher};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::repository::TeacherStore;

impl TeacherStore for Database {
    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let mut stmt = self.conn().prepare(
            "SELECT username, display_name, password, role
             FROM teachers
             ORDER BY username ASC",
        )?;
        let rows = stmt.query_map([], row_to_teacher)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    fn get_teacher(&self, username: &str) -> Result<Option<Teacher>> {
        let teacher = self
            .conn()
            .query_row(
                "SELECT username, display_name, password, role
                 FROM teachers
                 WHERE username = ?1",
                params![username],
                row_to_teacher,
            )
            .optional()?;
        Ok(teacher)
    }

    fn save_teacher(&self, teacher: &Teacher) -> Result<Teacher> {
        self.conn().execute(
            "INSERT INTO teachers (username, display_name, password, role)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(username) DO UPDATE SET
                 display_name = excluded.display_name,
                 password     = excluded.password,
                 role         = excluded.role",
            params![
                teacher.username,
                teacher.display_name,
                teacher.password,
                teacher.role.as_str(),
            ],
        )?;
        Ok(teacher.clone())
    }

    fn delete_teacher(&self, username: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM teachers WHERE username = ?1", params![username])?;
        Ok(affected > 0)
    }

    fn teacher_exists(&self, username: &str) -> Result<bool> {
        let found = self
            .conn()
            .query_row(
                "SELECT 1 FROM teachers WHERE username = ?1",
                params![username],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

/// Map a `rusqlite::Row` to a [`Teacher`].
///
/// Text columns are copied as stored; only the role must parse. Blank names
/// are left for the reference builder to reject.
fn row_to_teacher(row: &rusqlite::Row<'_>) -> rusqlite::Result<Teacher> {
    let role_str: String = row.get(3)?;
    let role = Role::parse(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown role {role_str:?}").into(),
        )
    })?;

    Ok(Teacher {
        username: row.get(0)?,
        display_name: row.get(1)?,
        password: row.get(2)?,
        role,
    })
}
