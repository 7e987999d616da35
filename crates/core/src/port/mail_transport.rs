// Mail Transport Port (Interface)
// Abstraction over the outbound email provider (SMTP, API gateway, ...)

use async_trait::async_trait;
use thiserror::Error;

/// A rendered message ready to hand to the provider
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transport errors are transient by assumption and drive the bounded retry loop
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Message rejected: {0}")]
    Rejected(String),
}

/// Mail transport trait
///
/// Implementations: SMTP relay, provider HTTP API, logging stub for local runs.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message
    ///
    /// # Errors
    /// Any `TransportError` is treated as retryable by the delivery worker.
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock transport behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always succeed
        Success,
        /// Always fail with message
        Fail(String),
        /// Fail the first N sends, then succeed
        FailFirst(usize),
    }

    /// Mock mail transport for testing
    pub struct MockMailTransport {
        behavior: Mutex<MockBehavior>,
        call_count: Arc<Mutex<usize>>,
        sent: Arc<Mutex<Vec<OutboundEmail>>>,
    }

    impl MockMailTransport {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Mutex::new(behavior),
                call_count: Arc::new(Mutex::new(0)),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }

        pub fn new_fail_first(n: usize) -> Self {
            Self::new(MockBehavior::FailFirst(n))
        }

        /// Number of send attempts observed
        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }

        /// Messages that were accepted
        pub fn sent_messages(&self) -> Vec<OutboundEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailTransport for MockMailTransport {
        async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
            let attempt = {
                let mut count = self.call_count.lock().unwrap();
                *count += 1;
                *count
            };

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success => {
                    self.sent.lock().unwrap().push(email.clone());
                    Ok(())
                }
                MockBehavior::Fail(message) => Err(TransportError::Provider(message)),
                MockBehavior::FailFirst(n) => {
                    if attempt <= n {
                        Err(TransportError::Connection(format!(
                            "simulated failure on attempt {}",
                            attempt
                        )))
                    } else {
                        self.sent.lock().unwrap().push(email.clone());
                        Ok(())
                    }
                }
            }
        }
    }
}
