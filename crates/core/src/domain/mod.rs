// Domain Layer - Pure business logic and entities

pub mod aggregate;
pub mod error;
pub mod event;
pub mod notification;
pub mod priority;
pub mod status;

// Re-exports
pub use aggregate::{Aggregate, EventBuffer};
pub use error::DomainError;
pub use event::{DomainEvent, EventKind};
pub use notification::NotificationRequest;
pub use priority::Priority;
pub use status::DeliveryStatus;
