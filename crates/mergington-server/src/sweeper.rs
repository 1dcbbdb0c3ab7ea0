//! Background repair sweeps.
//!
//! The store is synchronous, so each sweep runs on the blocking pool while
//! holding the database lock for its whole duration.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mergington_store::Database;
use mergington_sync::{SweepReport, SyncEngine};
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub type SharedDatabase = Arc<Mutex<Database>>;

/// Run one `resync_all` pass over the shared database.
pub async fn sweep_once(db: SharedDatabase) -> anyhow::Result<SweepReport> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<SweepReport> {
        let guard = db
            .lock()
            .map_err(|_| anyhow::anyhow!("database mutex poisoned"))?;
        Ok(SyncEngine::over(&*guard).resync_all()?)
    })
    .await?
}

/// Sweep every `period` until the task is aborted. A failed sweep is
/// logged and the next tick tries again.
pub fn spawn_periodic(db: SharedDatabase, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // the first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            match sweep_once(db.clone()).await {
                Ok(report) => debug!(
                    scanned = report.scanned,
                    repaired = report.repaired,
                    skipped = report.skipped,
                    "periodic sweep done"
                ),
                Err(e) => error!(error = %e, "periodic sweep failed"),
            }
        }
    })
}
