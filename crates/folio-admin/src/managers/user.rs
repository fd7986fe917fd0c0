use std::sync::Arc;

use chrono::Utc;
use folio_core::models::{User, UserPayload};
use folio_core::AppError;
use folio_db::Repository;
use uuid::Uuid;
use validator::Validate;

use super::not_found;
use crate::password::hash_password;

#[derive(Clone)]
pub struct UserManager {
    repo: Arc<dyn Repository<User>>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn Repository<User>>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, payload), fields(email = %payload.email))]
    pub async fn create(&self, payload: UserPayload) -> Result<User, AppError> {
        payload.validate()?;

        let password = payload
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Password is required".to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password_hash: hash_password(password)?,
            is_admin: payload.is_admin,
            status: payload.status,
            updated_at: Utc::now(),
        };

        self.repo.save(&user).await?;
        tracing::info!(id = %user.id, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    /// An empty password keeps the current hash.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: UserPayload) -> Result<User, AppError> {
        payload.validate()?;

        let mut user = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("User", id))?;

        user.name = payload.name.trim().to_string();
        user.email = payload.email.trim().to_string();
        user.is_admin = payload.is_admin;
        user.status = payload.status;
        if let Some(password) = payload.password.as_deref().filter(|p| !p.is_empty()) {
            user.password_hash = hash_password(password)?;
        }
        user.updated_at = Utc::now();

        self.repo.save(&user).await?;
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found("User", id));
        }
        tracing::info!(id = %id, "User deleted");
        Ok(())
    }
}
