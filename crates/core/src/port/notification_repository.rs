// Notification Repository Port (Interface)

use crate::domain::{DeliveryStatus, NotificationRequest, Priority};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for notification request persistence
///
/// The audit trail is append-only: records are created once and updated by
/// the delivery worker, never deleted.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a new notification request
    async fn create(&self, request: &NotificationRequest) -> Result<()>;

    /// Upsert an existing notification request (status transitions touch updated_at)
    async fn save(&self, request: &NotificationRequest) -> Result<()>;

    /// Find a request by id
    async fn find_by_id(&self, id: &str) -> Result<Option<NotificationRequest>>;

    /// Page through pending requests, oldest first
    async fn find_pending(&self, limit: usize, offset: usize) -> Result<Vec<NotificationRequest>>;

    /// Page through requests matching a status and priority, oldest first
    async fn find_by_status_and_priority(
        &self,
        status: DeliveryStatus,
        priority: Priority,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NotificationRequest>>;
}
