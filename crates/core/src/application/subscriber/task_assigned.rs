// Task assignment subscriber (task_assigned)

use super::resolve_recipient;
use crate::application::event_bus::EventHandler;
use crate::application::notify::{CreateNotificationRequest, NotificationService};
use crate::domain::DomainEvent;
use crate::error::Result;
use crate::port::UserDirectory;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct TaskAssignedSubscriber {
    directory: Arc<dyn UserDirectory>,
    service: Arc<NotificationService>,
}

impl TaskAssignedSubscriber {
    pub fn new(directory: Arc<dyn UserDirectory>, service: Arc<NotificationService>) -> Self {
        Self { directory, service }
    }
}

#[async_trait]
impl EventHandler for TaskAssignedSubscriber {
    fn name(&self) -> &str {
        "task_assigned_email"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        let DomainEvent::TaskAssigned {
            assignee_id,
            task_title,
            ..
        } = event
        else {
            return Ok(());
        };

        let recipient = resolve_recipient(self.directory.as_ref(), assignee_id).await?;

        self.service
            .create(CreateNotificationRequest {
                event_type: "task_assigned".to_string(),
                recipient_id: recipient.id,
                recipient_address: recipient.address,
                subject: format!("New task: {}", task_title),
                template_name: "task_assigned".to_string(),
                template_data: json!({
                    "name": recipient.name,
                    "task_title": task_title,
                }),
                priority: Default::default(),
            })
            .await?;

        Ok(())
    }
}
