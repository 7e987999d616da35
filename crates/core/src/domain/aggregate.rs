// Aggregate Event Buffer
//
// Aggregates announce state changes by recording events into their buffer.
// The buffer is a shared handle: the event bus keeps a clone of it when an
// aggregate is marked for dispatch, so dispatch drains the same buffer the
// entity appends to. Draining clears the buffer as a whole; partial dispatch
// is never a persisted state.

use crate::domain::event::DomainEvent;
use std::sync::{Arc, Mutex};

/// Ordered buffer of events raised by one aggregate instance
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    inner: Arc<Mutex<Vec<DomainEvent>>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event (insertion order is dispatch order)
    pub fn record(&self, event: DomainEvent) {
        self.inner.lock().expect("event buffer poisoned").push(event);
    }

    /// Take all buffered events, leaving the buffer empty
    pub fn drain(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.inner.lock().expect("event buffer poisoned"))
    }

    /// Snapshot of currently buffered events (for inspection, not dispatch)
    pub fn pending(&self) -> Vec<DomainEvent> {
        self.inner.lock().expect("event buffer poisoned").clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("event buffer poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("event buffer poisoned").len()
    }
}

/// An entity that buffers domain events produced by its own state changes
pub trait Aggregate {
    /// Unique identity of this aggregate instance
    fn aggregate_id(&self) -> &str;

    /// The aggregate's event buffer
    fn event_buffer(&self) -> &EventBuffer;
}
