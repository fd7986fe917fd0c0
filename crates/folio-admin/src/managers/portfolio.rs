use std::sync::Arc;

use chrono::Utc;
use folio_core::models::{Portfolio, PortfolioPayload};
use folio_core::{AppError, UploadArea};
use folio_db::{Repository, SluggedRepository};
use folio_processing::UploadIngestor;
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, non_blank, not_found, save_with_uploads};
use crate::guard::Actor;
use crate::slug::SlugAllocator;

#[derive(Clone)]
pub struct PortfolioManager {
    repo: Arc<dyn SluggedRepository<Portfolio>>,
    uploads: UploadIngestor,
    slugs: SlugAllocator,
}

impl PortfolioManager {
    pub fn new(
        repo: Arc<dyn SluggedRepository<Portfolio>>,
        uploads: UploadIngestor,
        slugs: SlugAllocator,
    ) -> Self {
        Self {
            repo,
            uploads,
            slugs,
        }
    }

    pub async fn create(
        &self,
        payload: PortfolioPayload,
        author: &Actor,
    ) -> Result<Portfolio, AppError> {
        payload.validate()?;

        let mut item = Portfolio::new(payload.title.trim());
        item.author_id = Some(author.id);
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut item.slug,
            &item.title,
            None,
        )
        .await?;

        apply(&mut item, &payload);
        self.store(item, &payload).await
    }

    pub async fn update(&self, id: Uuid, payload: PortfolioPayload) -> Result<Portfolio, AppError> {
        payload.validate()?;

        let mut item = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Portfolio item", id))?;

        item.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut item.slug,
            &item.title,
            Some(id),
        )
        .await?;

        apply(&mut item, &payload);
        self.store(item, &payload).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let item = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Portfolio item", id))?;

        self.repo.delete(id).await?;
        if let Err(e) = self
            .uploads
            .remove(UploadArea::Portfolio, item.image.as_deref())
            .await
        {
            tracing::warn!(id = %id, error = %e, "Portfolio item deleted but its image could not be removed");
        }
        Ok(())
    }

    async fn store(
        &self,
        mut item: Portfolio,
        payload: &PortfolioPayload,
    ) -> Result<Portfolio, AppError> {
        let mut staged = Vec::new();
        if let Some(file) = payload.image.as_ref() {
            let upload = self
                .uploads
                .stage(file, UploadArea::Portfolio, item.image.as_deref())
                .await?;
            item.image = Some(upload.filename().to_string());
            staged.push(upload);
        }

        save_with_uploads(self.repo.as_ref(), &item, staged).await?;
        tracing::info!(id = %item.id, slug = %item.slug, "Portfolio item saved");
        Ok(item)
    }
}

fn apply(item: &mut Portfolio, payload: &PortfolioPayload) {
    item.content = non_blank(payload.content.as_deref());
    item.description = non_blank(payload.description.as_deref());
    item.status = payload.status;
    item.is_featured = payload.is_featured;
    item.updated_at = Utc::now();
}
