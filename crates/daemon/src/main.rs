//! Courier Daemon - Main Entry Point
//!
//! Wires the in-process adapters into the event bus, subscribers, and the
//! delivery worker pool, then runs until interrupted.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courier_core::application::delivery::constants::{
    DEFAULT_MAX_SEND_ATTEMPTS, DEFAULT_SWEEP_INTERVAL,
};
use courier_core::application::subscriber::register_all;
use courier_core::application::{
    shutdown_channel, DeliveryWorker, EventBus, NotificationService, ReconciliationSweep,
    RetryPolicy,
};
use courier_core::port::id_provider::UuidProvider;
use courier_core::port::time_provider::SystemTimeProvider;
use courier_infra_memory::{
    HandlebarsRenderer, InMemoryDeliveryQueue, InMemoryNotificationRepository,
    InMemorySideChannel, LoggingMailTransport, StaticUserDirectory,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_WORKERS: usize = 2;

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (JSON for production, pretty for development)
    let log_format = std::env::var("COURIER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("courier=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Courier v{} starting...", VERSION);

    // 2. Load configuration
    let workers: usize = env_parse("COURIER_WORKERS", DEFAULT_WORKERS);
    let retry_base_ms: u64 = env_parse("COURIER_RETRY_BASE_MS", 1000);
    let sweep_interval_secs: u64 =
        env_parse("COURIER_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL.as_secs());

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);

    let repository = Arc::new(InMemoryNotificationRepository::new());
    let queue = Arc::new(InMemoryDeliveryQueue::new());
    let side_channel = Arc::new(InMemorySideChannel::new());
    let renderer = Arc::new(
        HandlebarsRenderer::new().map_err(|e| anyhow::anyhow!("template setup failed: {}", e))?,
    );
    let transport = Arc::new(LoggingMailTransport);
    let directory = Arc::new(
        StaticUserDirectory::new().with_user("demo", "Demo User", "demo@example.com"),
    );

    let service = Arc::new(NotificationService::new(
        repository.clone(),
        queue.clone(),
        id_provider,
        time_provider.clone(),
    ));

    // 4. Event bus + subscribers
    let bus = Arc::new(EventBus::new());
    register_all(&bus, directory, service);

    // 5. Worker pool + reconciliation sweep
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut handles = Vec::new();

    for n in 0..workers {
        let worker = DeliveryWorker::new(
            repository.clone(),
            queue.clone(),
            renderer.clone(),
            transport.clone(),
            side_channel.clone(),
            RetryPolicy::new(
                DEFAULT_MAX_SEND_ATTEMPTS,
                Duration::from_millis(retry_base_ms),
            ),
            time_provider.clone(),
        );
        let token = shutdown_rx.clone();
        handles.push(tokio::spawn(async move {
            info!(worker = n, "Spawning delivery worker");
            worker.run(token).await
        }));
    }

    let sweep = ReconciliationSweep::new(
        repository.clone(),
        queue.clone(),
        time_provider.clone(),
        None,
    );
    let sweep_token = shutdown_rx.clone();
    handles.push(tokio::spawn(async move {
        sweep
            .run(Duration::from_secs(sweep_interval_secs), sweep_token)
            .await;
        Ok::<(), courier_core::AppError>(())
    }));

    info!(workers, "Courier running, press Ctrl-C to stop");

    // 6. Graceful shutdown
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown_tx.shutdown();

    for handle in handles {
        let _ = handle.await;
    }

    info!("Courier stopped");
    Ok(())
}
