// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid delivery status transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Notification request not found: {0}")]
    NotificationNotFound(String),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
