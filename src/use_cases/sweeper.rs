use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::ports::SessionStore;

// Background task that periodically drops expired sessions.
//
// Lookups enforce expiry on their own; the sweep only bounds memory held by
// sessions nobody touches again.
pub struct SessionSweeper {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    pub fn spawn<S>(store: S, every: Duration) -> Self
    where
        S: SessionStore + 'static,
    {
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(sweep_loop(store, every, shutdown.clone()));
        Self { shutdown, handle }
    }

    // Signal the task and wait for it to exit.
    pub async fn stop(self) {
        // notify_one keeps a permit, so a stop issued mid-sweep is not lost.
        self.shutdown.notify_one();
        if let Err(error) = self.handle.await {
            tracing::error!(%error, "session sweeper task failed");
        }
    }
}

async fn sweep_loop<S: SessionStore>(store: S, every: Duration, shutdown: Arc<Notify>) {
    let every = every.max(Duration::from_secs(1));
    let mut interval = tokio::time::interval_at(Instant::now() + every, every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                tracing::debug!("session sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match store.sweep().await {
                    Ok(0) => {}
                    Ok(removed) => tracing::info!(removed, "swept expired sessions"),
                    Err(error) => tracing::warn!(%error, "session sweep failed"),
                }
            }
        }
    }
}
