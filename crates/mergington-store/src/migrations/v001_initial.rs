//! v001 -- Initial schema creation.
//!
//! Teachers and categories are plain rows. Activities are stored as whole
//! JSON documents, with the fields that queries filter on copied into side
//! columns and the `activity_days` table.

use rusqlite::Connection;

const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Teachers
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS teachers (
    username     TEXT PRIMARY KEY NOT NULL,
    display_name TEXT NOT NULL,
    password     TEXT NOT NULL,               -- opaque credential
    role         TEXT NOT NULL                -- TEACHER | ADMIN
);

-- ----------------------------------------------------------------
-- Categories
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS categories (
    id               TEXT PRIMARY KEY NOT NULL,   -- lower-cased code
    label            TEXT NOT NULL,
    background_color TEXT NOT NULL,               -- #RRGGBB
    text_color       TEXT NOT NULL,               -- #RRGGBB
    description      TEXT,
    active           INTEGER NOT NULL DEFAULT 1   -- boolean 0/1
);

-- ----------------------------------------------------------------
-- Activities
-- ----------------------------------------------------------------
-- No foreign keys to teachers/categories: references are weak and the
-- sync engine owns their cleanup.
CREATE TABLE IF NOT EXISTS activities (
    name        TEXT PRIMARY KEY NOT NULL,
    category_id TEXT,                         -- copy of document.categoryId
    start_time  TEXT NOT NULL,                -- HH:MM:SS
    end_time    TEXT NOT NULL,                -- HH:MM:SS
    document    TEXT NOT NULL                 -- JSON
);

CREATE INDEX IF NOT EXISTS idx_activities_category_id ON activities(category_id);

CREATE TABLE IF NOT EXISTS activity_days (
    activity_name TEXT NOT NULL,
    day           TEXT NOT NULL,

    PRIMARY KEY (activity_name, day),
    FOREIGN KEY (activity_name) REFERENCES activities(name) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_activity_days_day ON activity_days(day);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
