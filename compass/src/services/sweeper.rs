use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::session::SessionStore;

/// Periodically drops sessions nobody has touched within the idle TTL.
#[derive(Clone)]
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval_secs: u64,
}

impl SessionSweeper {
    pub fn new(store: Arc<SessionStore>, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs: interval_secs.max(1),
        }
    }

    /// Run a single sweep. Sessions with a submission in flight are skipped.
    /// Returns the number of sessions removed.
    pub async fn run_once(&self) -> u64 {
        let before = self.store.len().await;
        if before == 0 {
            debug!("No sessions to sweep");
            return 0;
        }

        let removed = self.store.sweep_idle(Utc::now()).await as u64;

        if removed > 0 {
            info!(
                removed,
                remaining = before as u64 - removed,
                "Swept idle sessions"
            );
        } else {
            debug!(sessions = before, "No idle sessions");
        }

        removed
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }
}
