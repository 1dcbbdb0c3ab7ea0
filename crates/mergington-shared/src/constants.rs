/// Application name
pub const APP_NAME: &str = "Mergington High Activities";

/// Category colors are stored as `#RRGGBB`
pub const HEX_COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// RFC 5321 path limit
pub const EMAIL_MAX_LEN: usize = 254;

/// Display format for schedule times
pub const TIME_FORMAT: &str = "%H:%M";

/// Schedule times in side columns; fixed width so text order is time order
pub const STORAGE_TIME_FORMAT: &str = "%H:%M:%S";

/// Difficulty filter value selecting activities open to every level
pub const DIFFICULTY_ALL_LEVELS: &str = "all";
