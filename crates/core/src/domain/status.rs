// Delivery Status State Machine
//
// pending -> processing -> sent   (happy path, one step per advance)
// pending|processing -> failed    (explicit failure marking)
//
// Sent and failed are terminal; there is no transition back to pending.
// Retries re-use processing, they do not reset the record.

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Processing,
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Processing => "processing",
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Sent | DeliveryStatus::Failed)
    }

    /// Next status on the happy path
    ///
    /// Fails with `InvalidStateTransition` when called on a terminal status.
    pub fn next(&self) -> Result<DeliveryStatus> {
        match self {
            DeliveryStatus::Pending => Ok(DeliveryStatus::Processing),
            DeliveryStatus::Processing => Ok(DeliveryStatus::Sent),
            DeliveryStatus::Sent | DeliveryStatus::Failed => {
                Err(DomainError::InvalidStateTransition {
                    from: self.as_str().to_string(),
                    to: "cannot advance a terminal status".to_string(),
                })
            }
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
