use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// Author name recorded for comments left without a session.
pub const ANONYMOUS_AUTHOR_NAME: &str = "anon";

/// Reader comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Option<Uuid>,
    pub author_name: String,
    pub text: String,
    /// Approved (visible) flag
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}
