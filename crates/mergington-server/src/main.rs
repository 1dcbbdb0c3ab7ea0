//! # mergington-server
//!
//! Background process for the Mergington High activities store.
//!
//! This binary:
//! - opens (and migrates) the SQLite store
//! - seeds the default categories, teachers, and activities into an empty
//!   database
//! - runs a startup repair sweep so that every activity carries current
//!   teacher and category snapshots
//! - re-runs the sweep periodically until Ctrl+C, catching snapshots that
//!   went stale without a direct teacher or category write

mod config;
mod sweeper;

use std::sync::{Arc, Mutex};

use mergington_shared::constants::APP_NAME;
use mergington_store::seed::seed_defaults;
use mergington_store::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mergington=debug")),
        )
        .init();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(
        database = ?config.database_path,
        sync_interval = ?config.sync_interval,
        seed_on_start = config.seed_on_start,
        sync_on_start = config.sync_on_start,
        "Loaded configuration"
    );

    // -----------------------------------------------------------------------
    // 3. Open the store
    // -----------------------------------------------------------------------
    let db = match &config.database_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            info!(path = %path.display(), "opening database");
            Database::open_at(path)?
        }
        None => Database::new()?,
    };

    if config.seed_on_start {
        let stats = seed_defaults(&db, &config.seed_teacher_password)?;
        if stats.is_empty() {
            info!("Database already populated, seed skipped");
        }
    }

    let db = Arc::new(Mutex::new(db));

    // -----------------------------------------------------------------------
    // 4. Startup repair sweep
    // -----------------------------------------------------------------------
    if config.sync_on_start {
        let report = sweeper::sweep_once(db.clone()).await?;
        info!(
            scanned = report.scanned,
            repaired = report.repaired,
            skipped = report.skipped,
            "Startup sweep complete"
        );
    }

    // -----------------------------------------------------------------------
    // 5. Periodic sweep until shutdown
    // -----------------------------------------------------------------------
    let sweep_task = config.sync_interval.map(|period| {
        info!(every = ?period, "Periodic sweep enabled");
        sweeper::spawn_periodic(db.clone(), period)
    });

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C, shutting down");

    if let Some(task) = sweep_task {
        task.abort();
    }

    Ok(())
}
