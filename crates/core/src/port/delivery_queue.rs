// Priority Delivery Queue Port (Interface)

use crate::domain::Priority;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A queued delivery job
///
/// Ephemeral: the notification request is the durable audit record, the job is
/// only the delivery signal. Consumed by exactly one worker instance at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueJob {
    pub notification_id: String,
    /// Numeric priority score assigned at enqueue time
    pub score: i32,
}

/// Queue interface ordering delivery jobs by priority score
///
/// Contract: `dequeue` returns the highest-score job first (urgent=4 > high=3
/// > medium=2 > low=1). Within equal priority FIFO is expected but not
/// guaranteed; callers must not depend on strict same-priority ordering.
/// Delivery is at-least-once: a job may be redelivered after a worker crash.
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    /// Submit a job for the given notification request
    async fn enqueue(&self, notification_id: &str, priority: Priority) -> Result<()>;

    /// Pop the next job, or None when the queue is empty
    async fn dequeue(&self) -> Result<Option<QueueJob>>;
}
