//! Use cases over the store. Every teacher or category write is followed by
//! the matching sync call, and every activity read goes through the
//! staleness check before it is mapped to a view.

mod activities;
mod categories;
mod teachers;

pub use activities::{ActivityFilter, ActivityService};
pub use categories::CategoryService;
pub use teachers::TeacherService;
