// In-memory NotificationRepository implementation

use async_trait::async_trait;
use courier_core::domain::{DeliveryStatus, NotificationRequest, Priority};
use courier_core::error::{AppError, Result};
use courier_core::port::NotificationRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    records: RwLock<HashMap<String, NotificationRequest>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (for tests and metrics)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn find_sorted<F>(&self, predicate: F, limit: usize, offset: usize) -> Vec<NotificationRequest>
    where
        F: Fn(&NotificationRequest) -> bool,
    {
        let records = self.records.read().await;
        let mut matching: Vec<NotificationRequest> =
            records.values().filter(|r| predicate(r)).cloned().collect();
        // Oldest first; id as tiebreak for a stable order
        matching.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        matching.into_iter().skip(offset).take(limit).collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, request: &NotificationRequest) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&request.id) {
            return Err(AppError::Conflict(format!(
                "notification request already exists: {}",
                request.id
            )));
        }
        records.insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn save(&self, request: &NotificationRequest) -> Result<()> {
        // Upsert, last state wins
        self.records
            .write()
            .await
            .insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<NotificationRequest>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_pending(&self, limit: usize, offset: usize) -> Result<Vec<NotificationRequest>> {
        Ok(self
            .find_sorted(|r| r.status == DeliveryStatus::Pending, limit, offset)
            .await)
    }

    async fn find_by_status_and_priority(
        &self,
        status: DeliveryStatus,
        priority: Priority,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NotificationRequest>> {
        Ok(self
            .find_sorted(
                |r| r.status == status && r.priority == priority,
                limit,
                offset,
            )
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(id: &str, created_at: i64) -> NotificationRequest {
        NotificationRequest::new(
            id,
            created_at,
            "user_registered",
            "user-1",
            "alice@example.com",
            "Welcome!",
            "welcome",
            json!({}),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repo = InMemoryNotificationRepository::new();
        repo.create(&request("a", 1)).await.unwrap();
        assert!(repo.create(&request("a", 2)).await.is_err());
    }

    #[tokio::test]
    async fn test_find_pending_pages_oldest_first() {
        let repo = InMemoryNotificationRepository::new();
        repo.create(&request("b", 200)).await.unwrap();
        repo.create(&request("a", 100)).await.unwrap();
        repo.create(&request("c", 300)).await.unwrap();

        let mut sent = request("d", 50);
        sent.advance(60).unwrap();
        sent.advance(70).unwrap();
        repo.create(&sent).await.unwrap();

        let page = repo.find_pending(2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "a");
        assert_eq!(page[1].id, "b");

        let page = repo.find_pending(2, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "c");
    }

    #[tokio::test]
    async fn test_save_upserts_last_state() {
        let repo = InMemoryNotificationRepository::new();
        let mut req = request("a", 1);
        repo.create(&req).await.unwrap();

        req.advance(10).unwrap();
        repo.save(&req).await.unwrap();

        let loaded = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(loaded.status, DeliveryStatus::Processing);
        assert_eq!(loaded.updated_at, Some(10));
    }

    #[tokio::test]
    async fn test_find_by_status_and_priority() {
        let repo = InMemoryNotificationRepository::new();
        let mut urgent = request("u", 1);
        urgent.priority = Priority::Urgent;
        repo.create(&urgent).await.unwrap();
        repo.create(&request("m", 2)).await.unwrap();

        let found = repo
            .find_by_status_and_priority(DeliveryStatus::Pending, Priority::Urgent, 10, 0)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "u");
    }
}
