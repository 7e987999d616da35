// Notification Service - create-and-enqueue use case

pub mod create;
#[cfg(test)]
mod create_test;

pub use create::CreateNotificationRequest;

use crate::application::instrument::instrument;
use crate::error::Result;
use crate::port::{DeliveryQueue, IdProvider, NotificationRepository, TimeProvider};
use std::sync::Arc;

/// Entry point for "a message must be delivered" commands
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
    queue: Arc<dyn DeliveryQueue>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        queue: Arc<dyn DeliveryQueue>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repository,
            queue,
            id_provider,
            time_provider,
        }
    }

    /// Persist a notification request and enqueue it by priority
    pub async fn create(&self, req: CreateNotificationRequest) -> Result<String> {
        instrument(
            "create_notification",
            create::execute(
                self.repository.as_ref(),
                self.queue.as_ref(),
                self.id_provider.as_ref(),
                self.time_provider.as_ref(),
                req,
            ),
        )
        .await
    }
}
