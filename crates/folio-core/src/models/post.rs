use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};
use crate::form::form_bool;
use crate::storage_types::UploadedFile;

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub description: Option<String>,
    /// Published flag
    pub status: bool,
    pub is_featured: bool,
    pub category_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
    /// Stored filename of the cover image, relative to its upload area
    pub image: Option<String>,
    pub author_id: Option<Uuid>,
    pub views_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            content: None,
            description: None,
            status: false,
            is_featured: false,
            category_id: None,
            tag_ids: Vec::new(),
            image: None,
            author_id: None,
            views_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Post {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Admin form payload for a blog post
///
/// `date` overrides the creation date (`YYYY-MM-DD`); `tags` holds tag ids as
/// submitted, blanks included. The image is attached by the multipart layer.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "form_bool")]
    pub status: bool,
    #[serde(default, deserialize_with = "form_bool")]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub image: Option<UploadedFile>,
}
