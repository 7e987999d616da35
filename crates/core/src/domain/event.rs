// Domain Events
//
// Events are immutable facts produced by aggregates. Each variant carries the
// id of the aggregate that raised it and the time it occurred (epoch ms).
// The event kind is an explicit discriminator, never derived from a runtime
// type name, so handler registration survives renames and stripping.

use serde::{Deserialize, Serialize};

/// Stable discriminator for event types (registry key for the event bus)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    UserRegistered,
    PasswordResetRequested,
    TaskAssigned,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserRegistered => "user_registered",
            EventKind::PasswordResetRequested => "password_reset_requested",
            EventKind::TaskAssigned => "task_assigned",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A domain event raised by an aggregate
///
/// Immutable after creation; buffered on the aggregate and dispatched in the
/// order raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    UserRegistered {
        aggregate_id: String,
        occurred_at: i64,
        user_id: String,
    },
    PasswordResetRequested {
        aggregate_id: String,
        occurred_at: i64,
        user_id: String,
        reset_token: String,
    },
    TaskAssigned {
        aggregate_id: String,
        occurred_at: i64,
        assignee_id: String,
        task_title: String,
    },
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::UserRegistered { .. } => EventKind::UserRegistered,
            DomainEvent::PasswordResetRequested { .. } => EventKind::PasswordResetRequested,
            DomainEvent::TaskAssigned { .. } => EventKind::TaskAssigned,
        }
    }

    pub fn aggregate_id(&self) -> &str {
        match self {
            DomainEvent::UserRegistered { aggregate_id, .. } => aggregate_id,
            DomainEvent::PasswordResetRequested { aggregate_id, .. } => aggregate_id,
            DomainEvent::TaskAssigned { aggregate_id, .. } => aggregate_id,
        }
    }

    pub fn occurred_at(&self) -> i64 {
        match self {
            DomainEvent::UserRegistered { occurred_at, .. } => *occurred_at,
            DomainEvent::PasswordResetRequested { occurred_at, .. } => *occurred_at,
            DomainEvent::TaskAssigned { occurred_at, .. } => *occurred_at,
        }
    }
}
