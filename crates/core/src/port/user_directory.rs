// User Directory Port (Interface)
// Recipient resolution lives in the identity subsystem; the pipeline only
// needs id, display name and address.

use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a recipient by user id, None when the user does not exist
    async fn find_recipient(&self, user_id: &str) -> Result<Option<Recipient>>;
}
