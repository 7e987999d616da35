// Logging mail transport (local runs)
//
// Logs every message and reports success; the real deployment plugs an SMTP
// or provider-API transport behind the same port.

use async_trait::async_trait;
use courier_core::port::{MailTransport, OutboundEmail, TransportError};
use tracing::info;

pub struct LoggingMailTransport;

#[async_trait]
impl MailTransport for LoggingMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body_len = email.body.len(),
            "Outbound mail (logging transport)"
        );
        Ok(())
    }
}
