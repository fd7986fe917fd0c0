use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};
use crate::storage_types::UploadedFile;

/// Which of a product's two pictures an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductPicture {
    Preview,
    Detail,
}

/// Shop product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub detail_text: Option<String>,
    pub preview_text: Option<String>,
    /// Price in minor currency units
    pub price: i64,
    /// Units in stock
    pub balance: i64,
    pub composition: Option<String>,
    pub features: Option<String>,
    pub size: Option<String>,
    pub manufacturer: Option<String>,
    pub delivery: Option<String>,
    pub stars: Option<f32>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<Uuid>,
    pub preview_picture: Option<String>,
    pub detail_picture: Option<String>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            detail_text: None,
            preview_text: None,
            price: 0,
            balance: 0,
            composition: None,
            features: None,
            size: None,
            manufacturer: None,
            delivery: None,
            stars: None,
            date: None,
            category_id: None,
            preview_picture: None,
            detail_picture: None,
            author_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn picture(&self, which: ProductPicture) -> Option<&str> {
        match which {
            ProductPicture::Preview => self.preview_picture.as_deref(),
            ProductPicture::Detail => self.detail_picture.as_deref(),
        }
    }

    pub fn set_picture(&mut self, which: ProductPicture, filename: Option<String>) {
        match which {
            ProductPicture::Preview => self.preview_picture = filename,
            ProductPicture::Detail => self.detail_picture = filename,
        }
    }
}

impl Entity for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Product {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
    #[serde(default)]
    pub detail_text: Option<String>,
    #[serde(default)]
    pub preview_text: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub balance: Option<i64>,
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub stars: Option<f32>,
    #[serde(skip)]
    pub preview_picture: Option<UploadedFile>,
    #[serde(skip)]
    pub detail_picture: Option<UploadedFile>,
}
