// Delivery Worker - turns queued jobs into sent (or dead-lettered) messages
//
// The worker is the only writer of notification request status. Safe to run
// as multiple concurrent instances: the queue hands each job to exactly one
// worker, and job executions share no mutable state beyond the injected ports.

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::retry::RetryPolicy;
use crate::domain::{DeliveryStatus, NotificationRequest};
use crate::error::Result;
use crate::port::{
    DeliverySignal, DeliveryQueue, MailTransport, NotificationRepository, OutboundEmail,
    QueueJob, SideChannel, TemplateRenderer, TimeProvider,
};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, warn};

pub struct DeliveryWorker {
    repository: Arc<dyn NotificationRepository>,
    queue: Arc<dyn DeliveryQueue>,
    renderer: Arc<dyn TemplateRenderer>,
    transport: Arc<dyn MailTransport>,
    channel: Arc<dyn SideChannel>,
    retry_policy: RetryPolicy,
    time_provider: Arc<dyn TimeProvider>,
}

impl DeliveryWorker {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        queue: Arc<dyn DeliveryQueue>,
        renderer: Arc<dyn TemplateRenderer>,
        transport: Arc<dyn MailTransport>,
        channel: Arc<dyn SideChannel>,
        retry_policy: RetryPolicy,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repository,
            queue,
            renderer,
            transport,
            channel,
            retry_policy,
            time_provider,
        }
    }

    /// Run worker loop with graceful shutdown support
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        info!("Delivery worker started");
        loop {
            if shutdown.is_shutdown() {
                info!("Delivery worker shutting down");
                break;
            }
            match self.process_next_job().await {
                Ok(processed) => {
                    if !processed {
                        // No job available, sleep briefly (or wait for shutdown)
                        tokio::select! {
                            _ = sleep(IDLE_SLEEP_DURATION) => {},
                            _ = shutdown.wait() => {
                                info!("Delivery worker interrupted during idle");
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    error!("Delivery worker error: {}", e);
                    tokio::select! {
                        _ = sleep(ERROR_RECOVERY_SLEEP_DURATION) => {},
                        _ = shutdown.wait() => {
                            info!("Delivery worker interrupted during error recovery");
                            break;
                        }
                    }
                }
            }
        }
        info!("Delivery worker stopped");
        Ok(())
    }

    /// Process the next queued job (returns true if a job was consumed)
    pub async fn process_next_job(&self) -> Result<bool> {
        let job = match self.queue.dequeue().await? {
            Some(job) => job,
            None => return Ok(false),
        };

        let started = self.time_provider.now_millis();

        // 1. Fetch the audit record. A missing record is permanent: there is
        //    nothing to retry against, the job is dropped.
        let mut request = match self.repository.find_by_id(&job.notification_id).await? {
            Some(request) => request,
            None => {
                warn!(
                    notification_id = %job.notification_id,
                    "Notification request missing, dropping job"
                );
                return Ok(true);
            }
        };

        // At-least-once queue semantics: a redelivered job for an already
        // terminal record is dropped, the terminal guard makes this idempotent.
        if request.status.is_terminal() {
            info!(
                notification_id = %request.id,
                status = %request.status,
                "Request already terminal, dropping redelivered job"
            );
            return Ok(true);
        }

        // 2. pending -> processing. Retried jobs arrive already in processing;
        //    they stay there, never back to pending.
        if request.status == DeliveryStatus::Pending {
            let now = self.time_provider.now_millis();
            request.advance(now)?;
            if !self.persist_status(&request).await {
                // The job aborts here; the repair backlog entry is what
                // eventually fixes the stuck status.
                return Ok(true);
            }
        }

        self.deliver(&job, &mut request).await?;

        // 5. Observability record regardless of outcome
        let duration_ms = self.time_provider.now_millis() - started;
        info!(
            notification_id = %request.id,
            status = %request.status,
            priority = %request.priority,
            duration_ms,
            "Delivery finished"
        );

        Ok(true)
    }

    /// Render and send with a bounded retry loop
    ///
    /// The record stays in processing for the whole loop; failed is persisted
    /// exactly once, after the final attempt. A consumer reading status
    /// mid-retry never sees a false terminal state.
    async fn deliver(&self, job: &QueueJob, request: &mut NotificationRequest) -> Result<()> {
        let mut attempts: u32 = 0;

        while self.retry_policy.attempts_remaining(attempts) {
            attempts += 1;
            if attempts > 1 {
                let delay = self.retry_policy.delay_for(attempts - 1);
                info!(
                    notification_id = %request.id,
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying send"
                );
                sleep(delay).await;
            }

            match self.render_and_send(request).await {
                Ok(()) => {
                    let now = self.time_provider.now_millis();
                    request.advance(now)?; // processing -> sent
                    self.persist_status(request).await;
                    self.publish_signal(DeliverySignal::delivered(&request.id))
                        .await;
                    info!(
                        notification_id = %request.id,
                        attempts,
                        "Notification delivered"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        notification_id = %request.id,
                        attempt = attempts,
                        error = %e,
                        "Send attempt failed"
                    );
                }
            }
        }

        // Retries exhausted: terminal failure, dead-letter the id
        let now = self.time_provider.now_millis();
        request.mark_failed(now)?;
        self.persist_status(request).await;

        error!(
            notification_id = %request.id,
            score = job.score,
            attempts,
            "All send attempts failed, dead-lettering"
        );
        if let Err(e) = self
            .channel
            .push_to_list(DEAD_LETTER_LIST, &request.id)
            .await
        {
            error!(
                notification_id = %request.id,
                error = %e,
                "Failed to push dead-letter entry"
            );
        }
        self.publish_signal(DeliverySignal::failed(&request.id)).await;

        Ok(())
    }

    async fn render_and_send(&self, request: &NotificationRequest) -> Result<()> {
        // Render failures enter the same retry loop as transport failures:
        // rendering is cheap and may succeed once data becomes available.
        let body = self
            .renderer
            .render(&request.template_name, &request.template_data)?;

        let email = OutboundEmail {
            to: request.recipient_address.clone(),
            subject: request.subject.clone(),
            body,
        };
        self.transport.send(&email).await?;
        Ok(())
    }

    /// Persist a status transition; on failure push a repair record instead of
    /// retrying the write inline. Returns whether the write succeeded.
    async fn persist_status(&self, request: &NotificationRequest) -> bool {
        match self.repository.save(request).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    notification_id = %request.id,
                    status = %request.status,
                    error = %e,
                    "Status write failed, pushing repair record"
                );
                let payload = serde_json::json!({
                    "notificationRequestId": request.id,
                    "status": request.status.as_str(),
                })
                .to_string();
                if let Err(e) = self.channel.push_to_list(STATUS_REPAIR_LIST, &payload).await {
                    error!(
                        notification_id = %request.id,
                        error = %e,
                        "Failed to push status repair record"
                    );
                }
                false
            }
        }
    }

    /// Fire-and-forget completion signal
    async fn publish_signal(&self, signal: DeliverySignal) {
        let message = match serde_json::to_string(&signal) {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, "Failed to serialize delivery signal");
                return;
            }
        };
        if let Err(e) = self.channel.publish(NOTIFICATION_CHANNEL, &message).await {
            warn!(
                notification_id = %signal.notification_request_id,
                error = %e,
                "Failed to publish delivery signal"
            );
        }
    }
}
