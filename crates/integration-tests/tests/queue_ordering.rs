//! Priority ordering through the create-and-enqueue use case

use std::sync::Arc;

use courier_core::application::notify::CreateNotificationRequest;
use courier_core::application::{NotificationService, ReconciliationSweep};
use courier_core::domain::Priority;
use courier_core::port::id_provider::mocks::SequentialIdProvider;
use courier_core::port::time_provider::mocks::FixedTimeProvider;
use courier_core::port::{DeliveryQueue, NotificationRepository};
use courier_infra_memory::{InMemoryDeliveryQueue, InMemoryNotificationRepository};
use serde_json::json;

fn command(event_type: &str, priority: Priority) -> CreateNotificationRequest {
    CreateNotificationRequest {
        event_type: event_type.to_string(),
        recipient_id: "user-1".to_string(),
        recipient_address: "alice@example.com".to_string(),
        subject: "subject".to_string(),
        template_name: "welcome".to_string(),
        template_data: json!({}),
        priority,
    }
}

/// Urgent dequeues before low, regardless of enqueue order
#[tokio::test]
async fn test_urgent_dequeues_before_low() {
    let repository = Arc::new(InMemoryNotificationRepository::new());
    let queue = Arc::new(InMemoryDeliveryQueue::new());
    let service = NotificationService::new(
        repository.clone(),
        queue.clone(),
        Arc::new(SequentialIdProvider::new()),
        Arc::new(FixedTimeProvider::new(1_000)),
    );

    let low_id = service
        .create(command("digest", Priority::Low))
        .await
        .unwrap();
    let urgent_id = service
        .create(command("password_reset", Priority::Urgent))
        .await
        .unwrap();

    let first = queue.dequeue().await.unwrap().unwrap();
    let second = queue.dequeue().await.unwrap().unwrap();
    assert_eq!(first.notification_id, urgent_id);
    assert_eq!(second.notification_id, low_id);
}

/// A request created with no explicit priority defaults to medium
#[tokio::test]
async fn test_default_priority_is_medium() {
    let repository = Arc::new(InMemoryNotificationRepository::new());
    let queue = Arc::new(InMemoryDeliveryQueue::new());
    let service = NotificationService::new(
        repository.clone(),
        queue.clone(),
        Arc::new(SequentialIdProvider::new()),
        Arc::new(FixedTimeProvider::new(1_000)),
    );

    let id = service
        .create(command("user_registered", Priority::default()))
        .await
        .unwrap();

    let stored = repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.priority, Priority::Medium);
    assert_eq!(queue.dequeue().await.unwrap().unwrap().score, 2);
}

/// The reconciliation sweep re-enqueues stale pending records
#[tokio::test]
async fn test_sweep_reenqueues_stale_pending() {
    let repository = Arc::new(InMemoryNotificationRepository::new());
    let queue = Arc::new(InMemoryDeliveryQueue::new());
    let time_provider = Arc::new(FixedTimeProvider::new(1_000));
    let service = NotificationService::new(
        repository.clone(),
        queue.clone(),
        Arc::new(SequentialIdProvider::new()),
        time_provider.clone(),
    );

    let id = service
        .create(command("user_registered", Priority::High))
        .await
        .unwrap();

    // Simulate the crash-between-create-and-enqueue gap: the job is lost
    assert!(queue.dequeue().await.unwrap().is_some());
    assert!(queue.is_empty());

    // Within the stale window nothing happens
    let sweep = ReconciliationSweep::new(
        repository.clone(),
        queue.clone(),
        time_provider.clone(),
        Some(60_000),
    );
    assert_eq!(sweep.sweep_once().await.unwrap(), 0);

    // Once the record is older than the window it is re-enqueued
    time_provider.advance(120_000);
    assert_eq!(sweep.sweep_once().await.unwrap(), 1);

    let job = queue.dequeue().await.unwrap().unwrap();
    assert_eq!(job.notification_id, id);
    assert_eq!(job.score, Priority::High.score());
}
