// Password reset subscriber (password_reset_requested)
//
// Reset mails are time-sensitive, so they go out at urgent priority.

use super::resolve_recipient;
use crate::application::event_bus::EventHandler;
use crate::application::notify::{CreateNotificationRequest, NotificationService};
use crate::domain::{DomainEvent, Priority};
use crate::error::Result;
use crate::port::UserDirectory;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct PasswordResetSubscriber {
    directory: Arc<dyn UserDirectory>,
    service: Arc<NotificationService>,
}

impl PasswordResetSubscriber {
    pub fn new(directory: Arc<dyn UserDirectory>, service: Arc<NotificationService>) -> Self {
        Self { directory, service }
    }
}

#[async_trait]
impl EventHandler for PasswordResetSubscriber {
    fn name(&self) -> &str {
        "password_reset_email"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        let DomainEvent::PasswordResetRequested {
            user_id,
            reset_token,
            ..
        } = event
        else {
            return Ok(());
        };

        let recipient = resolve_recipient(self.directory.as_ref(), user_id).await?;

        self.service
            .create(CreateNotificationRequest {
                event_type: "password_reset".to_string(),
                recipient_id: recipient.id,
                recipient_address: recipient.address,
                subject: "Reset your password".to_string(),
                template_name: "password_reset".to_string(),
                template_data: json!({
                    "name": recipient.name,
                    "reset_token": reset_token,
                }),
                priority: Priority::Urgent,
            })
            .await?;

        Ok(())
    }
}
