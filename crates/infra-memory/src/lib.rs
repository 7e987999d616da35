// Courier Infra (in-process) - reference adapters for the core ports
//
// The production deployment swaps SQL/Redis/SMTP adapters behind the same
// ports; these in-memory implementations back local runs and tests.

mod directory;
mod queue;
mod repository;
mod side_channel;
mod templates;
mod transport;

pub use directory::StaticUserDirectory;
pub use queue::InMemoryDeliveryQueue;
pub use repository::InMemoryNotificationRepository;
pub use side_channel::InMemorySideChannel;
pub use templates::HandlebarsRenderer;
pub use transport::LoggingMailTransport;
