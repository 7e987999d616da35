// Application Layer - Use Cases and Services

pub mod delivery;
pub mod event_bus;
pub mod instrument;
pub mod notify;
pub mod reconcile;
pub mod retry;
pub mod subscriber;

// Re-exports
pub use delivery::{shutdown_channel, DeliveryWorker, ShutdownSender, ShutdownToken};
pub use event_bus::{EventBus, EventHandler};
pub use notify::NotificationService;
pub use reconcile::ReconciliationSweep;
pub use retry::RetryPolicy;
