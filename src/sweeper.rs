//! Periodic revocation of expired links.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::application::services::UrlService;

/// Spawns a task that runs [`UrlService::auto_revoke_expired_urls`] every
/// `interval_secs` seconds.
///
/// Failures are logged and the next run proceeds as scheduled. Abort the
/// returned handle to stop the task.
pub fn spawn_auto_revoke_task(url_service: Arc<UrlService>, interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "Starting auto-revoke task");

        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match url_service.auto_revoke_expired_urls().await {
                Ok(0) => debug!("Auto-revoke found no expired links"),
                Ok(revoked) => info!(revoked, "Auto-revoke task revoked expired links"),
                Err(e) => error!(error = %e, "Auto-revoke task failed"),
            }
        }
    })
}
