use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// A reader's like on a post
///
/// Likes are anonymous. The client identifies a like it wants to undo by the
/// post id and the `created_at` it was handed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLike {
    pub id: Uuid,
    pub post_id: Uuid,
    pub ip: Option<String>,
    /// `navigator.deviceMemory` reported by the browser, in GiB
    pub device_memory: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostLike {
    pub fn new(post_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            ip: None,
            device_memory: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for PostLike {
    fn id(&self) -> Uuid {
        self.id
    }
}
