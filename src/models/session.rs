use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The logged-in context handed to every handler that acts on behalf of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            token: Uuid::new_v4(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}
