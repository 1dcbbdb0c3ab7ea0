//! # mergington-store
//!
//! Local storage for teachers, categories, and activities, backed by SQLite.
//!
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection` and implements the collection traits in
//! [`repository`] for every record type.

pub mod activities;
pub mod categories;
pub mod database;
pub mod migrations;
pub mod repository;
pub mod seed;
pub mod teachers;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use repository::{ActivityStore, CategoryStore, TeacherStore};
