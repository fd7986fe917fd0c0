use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};
use crate::form::form_bool;
use crate::storage_types::UploadedFile;

/// Portfolio showcase item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub description: Option<String>,
    pub status: bool,
    pub is_featured: bool,
    pub image: Option<String>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
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
            image: None,
            author_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Portfolio {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Portfolio {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PortfolioPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "form_bool")]
    pub status: bool,
    #[serde(default, deserialize_with = "form_bool")]
    pub is_featured: bool,
    #[serde(skip)]
    pub image: Option<UploadedFile>,
}
