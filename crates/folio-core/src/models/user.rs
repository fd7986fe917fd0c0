use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_blank, Entity};
use crate::form::form_bool;

/// Back-office user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC-formatted password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_admin: bool,
    /// Active flag
    pub status: bool,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// `password` is required on create; on update an empty value keeps the current hash.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "form_bool")]
    pub is_admin: bool,
    #[serde(default, deserialize_with = "form_bool")]
    pub status: bool,
}
