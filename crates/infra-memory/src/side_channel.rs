// In-memory side channel: broadcast pub/sub plus named lists

use async_trait::async_trait;
use courier_core::error::Result;
use courier_core::port::SideChannel;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

pub struct InMemorySideChannel {
    tx: broadcast::Sender<(String, String)>,
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl InMemorySideChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            lists: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to published (channel, message) pairs
    pub fn subscribe(&self) -> broadcast::Receiver<(String, String)> {
        self.tx.subscribe()
    }

    /// Snapshot of a named list (dead-letter, status-repair, ...)
    pub fn list(&self, name: &str) -> Vec<String> {
        self.lists
            .lock()
            .expect("side channel poisoned")
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemorySideChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SideChannel for InMemorySideChannel {
    async fn publish(&self, channel: &str, message: &str) -> Result<()> {
        // Fire-and-forget: no receivers is not an error
        let _ = self.tx.send((channel.to_string(), message.to_string()));
        Ok(())
    }

    async fn push_to_list(&self, list: &str, payload: &str) -> Result<()> {
        self.lists
            .lock()
            .expect("side channel poisoned")
            .entry(list.to_string())
            .or_default()
            .push(payload.to_string());
        Ok(())
    }
}
