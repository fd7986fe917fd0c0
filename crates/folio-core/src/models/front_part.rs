use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};
use crate::form::form_bool;

/// Editable block of the public front page (banners, teasers, links)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontPart {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_name: Option<String>,
    pub kind: Option<String>,
    pub preview_text: Option<String>,
    pub detail_text: Option<String>,
    pub status: bool,
    pub url: Option<String>,
}

impl FrontPart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            category_name: None,
            kind: None,
            preview_text: None,
            detail_text: None,
            status: false,
            url: None,
        }
    }
}

impl Entity for FrontPart {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for FrontPart {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// `slug`, when non-empty, replaces the title as the slug source.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FrontPartPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub preview_text: Option<String>,
    #[serde(default)]
    pub detail_text: Option<String>,
    #[serde(default, deserialize_with = "form_bool")]
    pub status: bool,
    #[serde(default)]
    pub url: Option<String>,
}
