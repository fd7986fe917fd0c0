use std::sync::Arc;

use folio_core::models::{Tag, TagPayload};
use folio_core::AppError;
use folio_db::{Repository, SluggedRepository};
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, not_found};
use crate::slug::SlugAllocator;

#[derive(Clone)]
pub struct TagManager {
    repo: Arc<dyn SluggedRepository<Tag>>,
    slugs: SlugAllocator,
}

impl TagManager {
    pub fn new(repo: Arc<dyn SluggedRepository<Tag>>, slugs: SlugAllocator) -> Self {
        Self { repo, slugs }
    }

    pub async fn create(&self, payload: TagPayload) -> Result<Tag, AppError> {
        payload.validate()?;

        let mut tag = Tag::new(payload.title.trim());
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut tag.slug,
            &tag.title,
            None,
        )
        .await?;

        self.repo.save(&tag).await?;
        tracing::info!(id = %tag.id, slug = %tag.slug, "Tag created");
        Ok(tag)
    }

    pub async fn update(&self, id: Uuid, payload: TagPayload) -> Result<Tag, AppError> {
        payload.validate()?;

        let mut tag = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Tag", id))?;

        tag.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut tag.slug,
            &tag.title,
            Some(id),
        )
        .await?;

        self.repo.save(&tag).await?;
        Ok(tag)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Tag", id));
        }
        Ok(())
    }
}
