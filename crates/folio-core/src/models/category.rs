use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};

/// Blog/shop category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub preview_text: Option<String>,
    pub detail_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            preview_text: None,
            detail_text: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Category {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Admin form payload for creating or updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: String,
    #[serde(default)]
    pub detail_text: Option<String>,
    #[serde(default)]
    pub preview_text: Option<String>,
}
