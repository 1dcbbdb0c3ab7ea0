use thiserror::Error;

/// A source entity or value object violated one of its field rules.
///
/// Raised both when building new records and when snapshotting a stored
/// record into an embedded reference, so a corrupt row surfaces here instead
/// of being copied into every activity that points at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a hex color in #RRGGBB format, got {value:?}")]
    InvalidColor { field: &'static str, value: String },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Email address too long ({len} chars, max {max})")]
    EmailTooLong { len: usize, max: usize },

    #[error("Schedule start {start} is after end {end}")]
    ScheduleOrder { start: String, end: String },

    #[error("maxParticipants must be greater than 0")]
    ZeroCapacity,

    #[error("{count} participants exceed capacity of {max}")]
    OverCapacity { count: usize, max: u32 },

    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
