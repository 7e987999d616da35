// In-memory priority delivery queue
//
// Max-heap keyed by (priority score, enqueue sequence): highest score pops
// first, ties pop in enqueue order. The FIFO tiebreak is stronger than the
// port contract requires; callers still must not depend on it.

use async_trait::async_trait;
use courier_core::domain::Priority;
use courier_core::error::Result;
use courier_core::port::{DeliveryQueue, QueueJob};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;

#[derive(Debug, Eq, PartialEq)]
struct Entry {
    score: i32,
    seq: u64,
    notification_id: String,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher score first; among equals, lower sequence (earlier enqueue) first
        self.score
            .cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub struct InMemoryDeliveryQueue {
    heap: Mutex<BinaryHeap<Entry>>,
    seq: AtomicU64,
}

impl InMemoryDeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue depth
    pub fn len(&self) -> usize {
        self.heap.lock().expect("queue poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.lock().expect("queue poisoned").is_empty()
    }
}

#[async_trait]
impl DeliveryQueue for InMemoryDeliveryQueue {
    async fn enqueue(&self, notification_id: &str, priority: Priority) -> Result<()> {
        let seq = self.seq.fetch_add(1, AtomicOrdering::SeqCst);
        self.heap.lock().expect("queue poisoned").push(Entry {
            score: priority.score(),
            seq,
            notification_id: notification_id.to_string(),
        });
        Ok(())
    }

    async fn dequeue(&self) -> Result<Option<QueueJob>> {
        Ok(self
            .heap
            .lock()
            .expect("queue poisoned")
            .pop()
            .map(|entry| QueueJob {
                notification_id: entry.notification_id,
                score: entry.score,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_urgent_dequeues_before_low() {
        let queue = InMemoryDeliveryQueue::new();
        queue.enqueue("low", Priority::Low).await.unwrap();
        queue.enqueue("urgent", Priority::Urgent).await.unwrap();
        queue.enqueue("medium", Priority::Medium).await.unwrap();

        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "urgent"
        );
        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "medium"
        );
        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "low"
        );
        assert!(queue.dequeue().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_priority_is_fifo() {
        let queue = InMemoryDeliveryQueue::new();
        queue.enqueue("first", Priority::Medium).await.unwrap();
        queue.enqueue("second", Priority::Medium).await.unwrap();
        queue.enqueue("third", Priority::Medium).await.unwrap();

        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "first"
        );
        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "second"
        );
        assert_eq!(
            queue.dequeue().await.unwrap().unwrap().notification_id,
            "third"
        );
    }

    #[tokio::test]
    async fn test_job_carries_score() {
        let queue = InMemoryDeliveryQueue::new();
        queue.enqueue("a", Priority::High).await.unwrap();

        let job = queue.dequeue().await.unwrap().unwrap();
        assert_eq!(job.score, 3);
    }
}
