//! # mergington-sync
//!
//! Keeps the teacher and category snapshots embedded in activity documents
//! consistent with their source records.
//!
//! - [`SyncEngine`] pushes source changes and deletions into the activities
//!   that reference them, and repairs single activities or the whole store.
//! - [`needs_sync`] is the cheap read-path check for missing embedded data.
//! - [`services`] wires both into the teacher, category, and activity use
//!   cases, and [`views`] maps activities to their output shape.

pub mod engine;
pub mod error;
pub mod services;
pub mod staleness;
pub mod views;

#[cfg(test)]
mod testing;

pub use engine::{SweepReport, SyncEngine};
pub use error::{Result, ServiceError, ServiceResult, SyncError};
pub use staleness::needs_sync;
pub use views::ActivityView;
