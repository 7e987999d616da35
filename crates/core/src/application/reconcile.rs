// Reconciliation sweep
//
// Create-then-enqueue is not transactional: a crash between the two writes
// leaves a pending record with no queue job. The sweep periodically re-enqueues
// pending records older than the stale window. Re-enqueueing a record whose
// job is merely slow is harmless under at-least-once semantics; the worker's
// terminal guard drops the duplicate.

use crate::application::delivery::constants::{
    DEFAULT_STALE_PENDING_WINDOW_MS, SWEEP_PAGE_SIZE,
};
use crate::application::delivery::ShutdownToken;
use crate::error::Result;
use crate::port::{DeliveryQueue, NotificationRepository, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub struct ReconciliationSweep {
    repository: Arc<dyn NotificationRepository>,
    queue: Arc<dyn DeliveryQueue>,
    time_provider: Arc<dyn TimeProvider>,
    stale_window_ms: i64,
}

impl ReconciliationSweep {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        queue: Arc<dyn DeliveryQueue>,
        time_provider: Arc<dyn TimeProvider>,
        stale_window_ms: Option<i64>,
    ) -> Self {
        Self {
            repository,
            queue,
            time_provider,
            stale_window_ms: stale_window_ms.unwrap_or(DEFAULT_STALE_PENDING_WINDOW_MS),
        }
    }

    /// Re-enqueue stale pending records once; returns how many were re-enqueued
    pub async fn sweep_once(&self) -> Result<usize> {
        let cutoff = self.time_provider.now_millis() - self.stale_window_ms;
        let mut offset = 0;
        let mut requeued = 0;

        loop {
            let page = self
                .repository
                .find_pending(SWEEP_PAGE_SIZE, offset)
                .await?;
            if page.is_empty() {
                break;
            }
            offset += page.len();

            for request in page {
                if request.created_at >= cutoff {
                    continue;
                }
                info!(
                    notification_id = %request.id,
                    created_at = request.created_at,
                    "Re-enqueueing stale pending request"
                );
                self.queue.enqueue(&request.id, request.priority).await?;
                requeued += 1;
            }
        }

        if requeued > 0 {
            info!(requeued, "Reconciliation sweep re-enqueued stale requests");
        }
        Ok(requeued)
    }

    /// Run the sweep periodically until shutdown
    pub async fn run(&self, interval: Duration, mut shutdown: ShutdownToken) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    if let Err(e) = self.sweep_once().await {
                        error!(error = %e, "Reconciliation sweep failed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("Reconciliation sweep stopped");
                    break;
                }
            }
        }
    }
}
