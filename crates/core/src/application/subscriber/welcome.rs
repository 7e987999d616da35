// Welcome email subscriber (user_registered)

use super::resolve_recipient;
use crate::application::event_bus::EventHandler;
use crate::application::notify::{CreateNotificationRequest, NotificationService};
use crate::domain::DomainEvent;
use crate::error::Result;
use crate::port::UserDirectory;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct WelcomeEmailSubscriber {
    directory: Arc<dyn UserDirectory>,
    service: Arc<NotificationService>,
}

impl WelcomeEmailSubscriber {
    pub fn new(directory: Arc<dyn UserDirectory>, service: Arc<NotificationService>) -> Self {
        Self { directory, service }
    }
}

#[async_trait]
impl EventHandler for WelcomeEmailSubscriber {
    fn name(&self) -> &str {
        "welcome_email"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        let DomainEvent::UserRegistered { user_id, .. } = event else {
            return Ok(());
        };

        let recipient = resolve_recipient(self.directory.as_ref(), user_id).await?;

        self.service
            .create(CreateNotificationRequest {
                event_type: "user_registered".to_string(),
                recipient_id: recipient.id,
                recipient_address: recipient.address,
                subject: format!("Welcome, {}!", recipient.name),
                template_name: "welcome".to_string(),
                template_data: json!({ "name": recipient.name }),
                priority: Default::default(),
            })
            .await?;

        Ok(())
    }
}
