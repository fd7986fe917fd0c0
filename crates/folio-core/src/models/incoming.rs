use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// Message sent through the public contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incoming {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    /// Handled flag
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Incoming {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            phone: None,
            message: message.into(),
            status: false,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Incoming {
    fn id(&self) -> Uuid {
        self.id
    }
}
