// Notification Request Entity
//
// The durable, append-only audit record that a message must be (or was)
// delivered. Created by a subscriber reacting to a domain event; mutated only
// by the delivery worker through the status transition methods. Never deleted.

use crate::domain::error::{DomainError, Result};
use crate::domain::priority::Priority;
use crate::domain::status::DeliveryStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub id: String,
    /// Business trigger, e.g. "password_reset"
    pub event_type: String,
    pub recipient_id: String,
    pub recipient_address: String,
    pub subject: String,
    pub template_name: String,
    /// Opaque key->value map handed to the template renderer
    pub template_data: serde_json::Value,
    pub status: DeliveryStatus,
    pub priority: Priority,
    pub created_at: i64, // epoch ms
    pub updated_at: Option<i64>,
}

impl NotificationRequest {
    /// Create a new request in pending status
    ///
    /// `id` and `created_at` are injected, not generated, so use cases stay
    /// deterministic under test.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        event_type: impl Into<String>,
        recipient_id: impl Into<String>,
        recipient_address: impl Into<String>,
        subject: impl Into<String>,
        template_name: impl Into<String>,
        template_data: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            recipient_id: recipient_id.into(),
            recipient_address: recipient_address.into(),
            subject: subject.into(),
            template_name: template_name.into(),
            template_data,
            status: DeliveryStatus::Pending,
            priority: Priority::default(),
            created_at,
            updated_at: None,
        }
    }

    /// Walk the happy path one step (pending -> processing -> sent)
    pub fn advance(&mut self, now_millis: i64) -> Result<DeliveryStatus> {
        let next = self.status.next()?;
        self.status = next;
        self.updated_at = Some(now_millis);
        Ok(next)
    }

    /// Jump to failed from any non-terminal status
    ///
    /// The terminal-state guard prevents regressing an already sent or failed
    /// record (last-state-wins under duplicate enqueue).
    pub fn mark_failed(&mut self, now_millis: i64) -> Result<()> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: DeliveryStatus::Failed.as_str().to_string(),
            });
        }
        self.status = DeliveryStatus::Failed;
        self.updated_at = Some(now_millis);
        Ok(())
    }
}
