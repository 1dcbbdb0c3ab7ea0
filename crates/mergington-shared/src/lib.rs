//! # mergington-shared
//!
//! Data contracts shared by the store, the sync engine, and the server:
//! teachers, categories, activities, their value objects, and the embedded
//! references an activity carries in place of a join.

pub mod constants;
pub mod error;
pub mod models;
pub mod references;
pub mod types;

pub use error::ValidationError;
pub use models::{normalize_category_id, Activity, Category, Teacher};
pub use references::{build_category_reference, build_teacher_reference, CategoryReference, TeacherReference};
pub use types::{DifficultyLevel, Email, Role, ScheduleDetails};
