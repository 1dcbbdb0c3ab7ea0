//! Server configuration loaded from environment variables.
//!
//! Every setting has a default, so the server starts with zero
//! configuration against the platform data directory.

use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite file to open.
    /// Env: `DATABASE_PATH`
    /// Default: `mergington.db` in the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Period of the background repair sweep. `None` disables it.
    /// Env: `SYNC_INTERVAL_SECS` (`0` disables)
    /// Default: `300`
    pub sync_interval: Option<Duration>,

    /// Insert the default school data into an empty database.
    /// Env: `SEED_ON_START` (true/false)
    /// Default: `true`
    pub seed_on_start: bool,

    /// Run one repair sweep before the periodic one starts.
    /// Env: `SYNC_ON_START` (true/false)
    /// Default: `true`
    pub sync_on_start: bool,

    /// Password given to the seeded teacher accounts.
    /// Env: `SEED_TEACHER_PASSWORD`
    /// Default: `changeme`
    pub seed_teacher_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            sync_interval: Some(Duration::from_secs(300)),
            seed_on_start: true,
            sync_on_start: true,
            seed_teacher_password: "changeme".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = var("DATABASE_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(val) = var("SYNC_INTERVAL_SECS") {
            match val.trim().parse::<u64>() {
                Ok(0) => config.sync_interval = None,
                Ok(secs) => config.sync_interval = Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid SYNC_INTERVAL_SECS, using default");
                }
            }
        }

        if let Some(val) = var("SEED_ON_START") {
            config.seed_on_start = flag(&val);
        }

        if let Some(val) = var("SYNC_ON_START") {
            config.sync_on_start = flag(&val);
        }

        if let Some(password) = var("SEED_TEACHER_PASSWORD") {
            if password.trim().is_empty() {
                tracing::warn!("Empty SEED_TEACHER_PASSWORD, using default");
            } else {
                config.seed_teacher_password = password;
            }
        }

        config
    }
}

fn flag(val: &str) -> bool {
    val != "false" && val != "0"
}
