// Static user directory (seeded map)

use async_trait::async_trait;
use courier_core::error::Result;
use courier_core::port::{Recipient, UserDirectory};
use std::collections::HashMap;

#[derive(Default)]
pub struct StaticUserDirectory {
    users: HashMap<String, Recipient>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let id = id.into();
        self.users.insert(
            id.clone(),
            Recipient {
                id,
                name: name.into(),
                address: address.into(),
            },
        );
        self
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn find_recipient(&self, user_id: &str) -> Result<Option<Recipient>> {
        Ok(self.users.get(user_id).cloned())
    }
}
