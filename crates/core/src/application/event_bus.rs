// Event Bus
//
// Decouples event producers (aggregates) from consumers (subscribers).
// One owned instance per process, not a language-level global: the registry
// and the marked-aggregate map live behind a mutex so registration and
// dispatch are safe from multiple threads, and tests can hold isolated
// instances.
//
// Dispatch is synchronous from the caller's point of view: handlers run
// in-line, in registration order, and a handler error aborts the remaining
// dispatch and propagates. Handlers must push durable recovery state (the
// notification request) before doing anything that can fail.

use crate::domain::{Aggregate, DomainEvent, EventBuffer, EventKind};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// A subscriber callback for one event kind
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handler name, for logs
    fn name(&self) -> &str;

    async fn handle(&self, event: &DomainEvent) -> Result<()>;
}

#[derive(Default)]
struct BusState {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
    /// Buffer handles of aggregates awaiting dispatch, keyed by aggregate id.
    /// Last write wins per id.
    marked: HashMap<String, EventBuffer>,
    /// When set, only these kinds dispatch (test isolation)
    allow_list: Option<HashSet<EventKind>>,
    enabled: bool,
}

pub struct EventBus {
    state: Mutex<BusState>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BusState {
                enabled: true,
                ..BusState::default()
            }),
        }
    }

    /// Append a handler for an event kind
    ///
    /// Multiple handlers per kind are allowed; all run, in registration order.
    pub fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        let mut state = self.state.lock().expect("event bus poisoned");
        debug!(kind = %kind, handler = handler.name(), "Registering event handler");
        state.handlers.entry(kind).or_default().push(handler);
    }

    /// Record that an aggregate has events awaiting dispatch
    pub fn mark_for_dispatch(&self, aggregate: &dyn Aggregate) {
        let mut state = self.state.lock().expect("event bus poisoned");
        state.marked.insert(
            aggregate.aggregate_id().to_string(),
            aggregate.event_buffer().clone(),
        );
    }

    /// Dispatch buffered events for one aggregate
    ///
    /// Always clears the aggregate's buffer, whether or not any handler ran;
    /// dispatch is fire-and-forget from the aggregate's perspective. When the
    /// bus is disabled the marked entry is removed and the events are dropped,
    /// not replayed.
    pub async fn dispatch_events_for_aggregate(&self, aggregate_id: &str) -> Result<()> {
        let (events, matched) = {
            let mut state = self.state.lock().expect("event bus poisoned");
            let buffer = match state.marked.remove(aggregate_id) {
                Some(buffer) => buffer,
                None => return Ok(()),
            };
            let events = buffer.drain();
            if !state.enabled {
                warn!(
                    aggregate_id,
                    dropped = events.len(),
                    "Event bus disabled, dropping buffered events"
                );
                return Ok(());
            }

            // Snapshot matching handlers while holding the lock, run without it
            let mut matched: Vec<(DomainEvent, Vec<Arc<dyn EventHandler>>)> = Vec::new();
            for event in events.iter() {
                let kind = event.kind();
                let allowed = state
                    .allow_list
                    .as_ref()
                    .map(|list| list.contains(&kind))
                    .unwrap_or(true);
                let handlers = if allowed {
                    state.handlers.get(&kind).cloned().unwrap_or_default()
                } else {
                    Vec::new()
                };
                matched.push((event.clone(), handlers));
            }
            (events.len(), matched)
        };

        debug!(aggregate_id, events, "Dispatching events for aggregate");

        for (event, handlers) in matched {
            for handler in handlers {
                debug!(
                    kind = %event.kind(),
                    handler = handler.name(),
                    "Invoking event handler"
                );
                // Errors propagate: a failing handler aborts the remaining
                // handlers for this event and the remaining events for this
                // aggregate.
                handler.handle(&event).await?;
            }
        }

        Ok(())
    }

    /// Only dispatch the given kinds (test isolation; production dispatches all)
    pub fn restrict_to(&self, kinds: &[EventKind]) {
        let mut state = self.state.lock().expect("event bus poisoned");
        state.allow_list = Some(kinds.iter().copied().collect());
    }

    /// Remove any allow-list restriction
    pub fn clear_restriction(&self) {
        self.state.lock().expect("event bus poisoned").allow_list = None;
    }

    /// Drop all registered handlers
    pub fn clear_handlers(&self) {
        self.state
            .lock()
            .expect("event bus poisoned")
            .handlers
            .clear();
    }

    /// Drop all marked aggregates (their buffered events are not replayed)
    pub fn clear_marked(&self) {
        self.state
            .lock()
            .expect("event bus poisoned")
            .marked
            .clear();
    }

    /// Enable or disable dispatch; disabled dispatch still clears marked entries
    pub fn set_enabled(&self, enabled: bool) {
        self.state.lock().expect("event bus poisoned").enabled = enabled;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
