// Side Channel Port (Interface)
//
// Fire-and-forget pub/sub signals plus best-effort lists. The worker uses the
// lists for the dead-letter backlog and the status-repair backlog, and the
// channel for delivery completion signals.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Completion signal published on the notification channel
///
/// Wire format: `{"event": "delivered"|"failed", "notificationRequestId": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySignal {
    pub event: String,
    #[serde(rename = "notificationRequestId")]
    pub notification_request_id: String,
}

impl DeliverySignal {
    pub fn delivered(notification_request_id: impl Into<String>) -> Self {
        Self {
            event: "delivered".to_string(),
            notification_request_id: notification_request_id.into(),
        }
    }

    pub fn failed(notification_request_id: impl Into<String>) -> Self {
        Self {
            event: "failed".to_string(),
            notification_request_id: notification_request_id.into(),
        }
    }
}

#[async_trait]
pub trait SideChannel: Send + Sync {
    /// Publish a message on a pub/sub channel (fire-and-forget)
    async fn publish(&self, channel: &str, message: &str) -> Result<()>;

    /// Append a payload to a named list
    async fn push_to_list(&self, list: &str, payload: &str) -> Result<()>;
}
