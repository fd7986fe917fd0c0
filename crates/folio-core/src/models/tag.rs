use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity, Sluggable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl Tag {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
        }
    }
}

impl Entity for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Tag {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TagPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub title: String,
}
