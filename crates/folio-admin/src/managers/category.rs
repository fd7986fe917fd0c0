use std::sync::Arc;

use chrono::Utc;
use folio_core::models::{Category, CategoryPayload};
use folio_core::AppError;
use folio_db::{Repository, SluggedRepository};
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, non_blank, not_found};
use crate::slug::SlugAllocator;

#[derive(Clone)]
pub struct CategoryManager {
    repo: Arc<dyn SluggedRepository<Category>>,
    slugs: SlugAllocator,
}

impl CategoryManager {
    pub fn new(repo: Arc<dyn SluggedRepository<Category>>, slugs: SlugAllocator) -> Self {
        Self { repo, slugs }
    }

    #[tracing::instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create(&self, payload: CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;

        let mut category = Category::new(payload.title.trim());
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut category.slug,
            &category.title,
            None,
        )
        .await?;
        apply(&mut category, &payload);

        self.repo.save(&category).await?;
        tracing::info!(id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;

        let mut category = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Category", id))?;

        category.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut category.slug,
            &category.title,
            Some(id),
        )
        .await?;
        apply(&mut category, &payload);

        self.repo.save(&category).await?;
        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Category", id));
        }
        tracing::info!(id = %id, "Category deleted");
        Ok(())
    }
}

fn apply(category: &mut Category, payload: &CategoryPayload) {
    category.preview_text = non_blank(payload.preview_text.as_deref());
    category.detail_text = non_blank(payload.detail_text.as_deref());
    category.updated_at = Utc::now();
}
