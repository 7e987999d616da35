// Port Layer - Interfaces for external dependencies

pub mod delivery_queue;
pub mod id_provider;
pub mod mail_transport;
pub mod notification_repository;
pub mod side_channel;
pub mod template_renderer;
pub mod time_provider;
pub mod user_directory;

// Re-exports
pub use delivery_queue::{DeliveryQueue, QueueJob};
pub use id_provider::IdProvider;
pub use mail_transport::{MailTransport, OutboundEmail, TransportError};
pub use notification_repository::NotificationRepository;
pub use side_channel::{DeliverySignal, SideChannel};
pub use template_renderer::{RenderError, TemplateRenderer};
pub use time_provider::TimeProvider;
pub use user_directory::{Recipient, UserDirectory};
