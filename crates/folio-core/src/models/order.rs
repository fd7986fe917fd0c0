use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};

/// Shop order as edited in the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub price: i64,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub contents: Option<String>,
    pub contents_json: Option<String>,
    pub manager: Option<String>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            price: 0,
            phone: None,
            address: None,
            notes: None,
            contents: None,
            contents_json: None,
            manager: None,
            status: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Order {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Order {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub contents_json: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
}
