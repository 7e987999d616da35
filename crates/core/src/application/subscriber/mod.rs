// Event Subscribers
//
// Thin glue between the event bus and the notification service: each
// subscriber listens for one business event, resolves the recipient, and
// issues a create-notification command. A missing recipient is an error and
// propagates per the bus failure semantics.

mod password_reset;
mod task_assigned;
mod welcome;

pub use password_reset::PasswordResetSubscriber;
pub use task_assigned::TaskAssignedSubscriber;
pub use welcome::WelcomeEmailSubscriber;

use crate::application::event_bus::EventBus;
use crate::application::notify::NotificationService;
use crate::domain::EventKind;
use crate::error::Result;
use crate::port::{Recipient, UserDirectory};
use std::sync::Arc;

/// Register every subscriber on the bus
pub fn register_all(
    bus: &EventBus,
    directory: Arc<dyn UserDirectory>,
    service: Arc<NotificationService>,
) {
    bus.register(
        EventKind::UserRegistered,
        Arc::new(WelcomeEmailSubscriber::new(
            directory.clone(),
            service.clone(),
        )),
    );
    bus.register(
        EventKind::PasswordResetRequested,
        Arc::new(PasswordResetSubscriber::new(
            directory.clone(),
            service.clone(),
        )),
    );
    bus.register(
        EventKind::TaskAssigned,
        Arc::new(TaskAssignedSubscriber::new(directory, service)),
    );
}

/// Resolve a recipient or fail with RecipientNotFound
pub(crate) async fn resolve_recipient(
    directory: &dyn UserDirectory,
    user_id: &str,
) -> Result<Recipient> {
    directory
        .find_recipient(user_id)
        .await?
        .ok_or_else(|| crate::domain::DomainError::RecipientNotFound(user_id.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::event_bus::EventHandler;
    use crate::domain::{DeliveryStatus, DomainEvent, NotificationRequest, Priority};
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use crate::port::user_directory::MockUserDirectory;
    use crate::port::{DeliveryQueue, NotificationRepository, QueueJob};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records created requests without persisting anything
    #[derive(Default)]
    struct RecordingRepository {
        created: Mutex<Vec<NotificationRequest>>,
    }

    #[async_trait]
    impl NotificationRepository for RecordingRepository {
        async fn create(&self, request: &NotificationRequest) -> Result<()> {
            self.created.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn save(&self, _request: &NotificationRequest) -> Result<()> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<NotificationRequest>> {
            Ok(None)
        }

        async fn find_pending(
            &self,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<NotificationRequest>> {
            Ok(Vec::new())
        }

        async fn find_by_status_and_priority(
            &self,
            _status: DeliveryStatus,
            _priority: Priority,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<NotificationRequest>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct RecordingQueue {
        enqueued: Mutex<Vec<(String, Priority)>>,
    }

    #[async_trait]
    impl DeliveryQueue for RecordingQueue {
        async fn enqueue(&self, notification_id: &str, priority: Priority) -> Result<()> {
            self.enqueued
                .lock()
                .unwrap()
                .push((notification_id.to_string(), priority));
            Ok(())
        }

        async fn dequeue(&self) -> Result<Option<QueueJob>> {
            Ok(None)
        }
    }

    fn service_with(
        repository: Arc<RecordingRepository>,
        queue: Arc<RecordingQueue>,
    ) -> Arc<NotificationService> {
        Arc::new(NotificationService::new(
            repository,
            queue,
            Arc::new(SequentialIdProvider::new()),
            Arc::new(FixedTimeProvider::new(1000)),
        ))
    }

    #[tokio::test]
    async fn test_welcome_subscriber_creates_medium_priority_request() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_recipient().returning(|_| {
            Ok(Some(Recipient {
                id: "user-1".to_string(),
                name: "Alice".to_string(),
                address: "alice@example.com".to_string(),
            }))
        });

        let repository = Arc::new(RecordingRepository::default());
        let queue = Arc::new(RecordingQueue::default());
        let subscriber = WelcomeEmailSubscriber::new(
            Arc::new(directory),
            service_with(repository.clone(), queue.clone()),
        );

        subscriber
            .handle(&DomainEvent::UserRegistered {
                aggregate_id: "user-1".to_string(),
                occurred_at: 1000,
                user_id: "user-1".to_string(),
            })
            .await
            .unwrap();

        let created = repository.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].event_type, "user_registered");
        assert_eq!(created[0].template_name, "welcome");
        assert_eq!(created[0].priority, Priority::Medium);
        assert_eq!(created[0].status, DeliveryStatus::Pending);

        let enqueued = queue.enqueued.lock().unwrap();
        assert_eq!(enqueued.len(), 1);
        assert_eq!(enqueued[0].1, Priority::Medium);
    }

    #[tokio::test]
    async fn test_password_reset_subscriber_uses_urgent_priority() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_recipient().returning(|_| {
            Ok(Some(Recipient {
                id: "user-2".to_string(),
                name: "Bob".to_string(),
                address: "bob@example.com".to_string(),
            }))
        });

        let repository = Arc::new(RecordingRepository::default());
        let queue = Arc::new(RecordingQueue::default());
        let subscriber = PasswordResetSubscriber::new(
            Arc::new(directory),
            service_with(repository.clone(), queue.clone()),
        );

        subscriber
            .handle(&DomainEvent::PasswordResetRequested {
                aggregate_id: "user-2".to_string(),
                occurred_at: 1000,
                user_id: "user-2".to_string(),
                reset_token: "tok-9".to_string(),
            })
            .await
            .unwrap();

        let created = repository.created.lock().unwrap();
        assert_eq!(created[0].event_type, "password_reset");
        assert_eq!(created[0].priority, Priority::Urgent);
        assert_eq!(created[0].template_data["reset_token"], "tok-9");
    }

    #[tokio::test]
    async fn test_missing_recipient_is_an_error() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_recipient().returning(|_| Ok(None));

        let repository = Arc::new(RecordingRepository::default());
        let queue = Arc::new(RecordingQueue::default());
        let subscriber = WelcomeEmailSubscriber::new(
            Arc::new(directory),
            service_with(repository.clone(), queue.clone()),
        );

        let result = subscriber
            .handle(&DomainEvent::UserRegistered {
                aggregate_id: "ghost".to_string(),
                occurred_at: 1000,
                user_id: "ghost".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(repository.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscriber_ignores_other_event_kinds() {
        let directory = MockUserDirectory::new();
        let repository = Arc::new(RecordingRepository::default());
        let queue = Arc::new(RecordingQueue::default());
        let subscriber = WelcomeEmailSubscriber::new(
            Arc::new(directory),
            service_with(repository.clone(), queue.clone()),
        );

        subscriber
            .handle(&DomainEvent::TaskAssigned {
                aggregate_id: "task-1".to_string(),
                occurred_at: 1000,
                assignee_id: "user-1".to_string(),
                task_title: "write docs".to_string(),
            })
            .await
            .unwrap();

        assert!(repository.created.lock().unwrap().is_empty());
    }
}
