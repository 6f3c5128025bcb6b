//! Periodic reclamation of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::store::{Store, deadline_after};

/// Handle to the background sweep task.
pub(super) struct Sweeper {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn a sweep over `store` every `interval`, first run one interval from now.
    pub(super) fn spawn(store: Arc<Store>, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(deadline_after(Instant::now(), interval), interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = store.sweep().await;
                        if removed > 0 {
                            tracing::debug!(removed, "swept expired cache entries");
                        }
                    }
                }
            }

            tracing::debug!("cache sweep stopped");
        });

        Self { token, handle }
    }

    /// Signal the task to stop without waiting for it.
    pub(super) fn cancel(&self) {
        self.token.cancel();
    }

    /// Signal the task to stop and wait until it has exited.
    ///
    /// A scan already in progress runs to completion before this returns.
    pub(super) async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!("cache sweep task ended abnormally: {}", e);
        }
    }
}
