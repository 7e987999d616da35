// Create Notification Request Use Case

use crate::domain::{NotificationRequest, Priority};
use crate::error::{AppError, Result};
use crate::port::{DeliveryQueue, IdProvider, NotificationRepository, TimeProvider};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Command issued by event subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    /// Business trigger, e.g. "password_reset"
    pub event_type: String,
    pub recipient_id: String,
    pub recipient_address: String,
    pub subject: String,
    pub template_name: String,
    pub template_data: serde_json::Value,

    #[serde(default)]
    pub priority: Priority,
}

pub(crate) fn validate_request(req: &CreateNotificationRequest) -> Result<()> {
    if req.event_type.is_empty() {
        return Err(AppError::Validation("event_type must not be empty".into()));
    }
    if req.recipient_id.is_empty() {
        return Err(AppError::Validation("recipient_id must not be empty".into()));
    }
    if !req.recipient_address.contains('@') {
        return Err(AppError::Validation(format!(
            "recipient_address is not a mail address: {}",
            req.recipient_address
        )));
    }
    if req.template_name.is_empty() {
        return Err(AppError::Validation(
            "template_name must not be empty".into(),
        ));
    }
    Ok(())
}

/// Execute the create-and-enqueue use case
///
/// Create, then enqueue. The two writes are not transactional: a crash in
/// between leaves a pending record with no queue job, which the periodic
/// reconciliation sweep re-enqueues.
pub async fn execute(
    repository: &dyn NotificationRepository,
    queue: &dyn DeliveryQueue,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: CreateNotificationRequest,
) -> Result<String> {
    validate_request(&req)?;

    let id = id_provider.generate_id();
    let created_at = time_provider.now_millis();

    let mut request = NotificationRequest::new(
        id.clone(),
        created_at,
        req.event_type,
        req.recipient_id,
        req.recipient_address,
        req.subject,
        req.template_name,
        req.template_data,
    );
    request.priority = req.priority;

    repository.create(&request).await?;
    queue.enqueue(&request.id, request.priority).await?;

    info!(
        notification_id = %request.id,
        event_type = %request.event_type,
        priority = %request.priority,
        "Notification request created and enqueued"
    );

    Ok(id)
}
