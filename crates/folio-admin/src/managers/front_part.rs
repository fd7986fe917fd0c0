use std::sync::Arc;

use folio_core::models::{FrontPart, FrontPartPayload};
use folio_core::AppError;
use folio_db::{Repository, SluggedRepository};
use uuid::Uuid;
use validator::Validate;

use super::{non_blank, not_found};
use crate::slug::SlugAllocator;

/// Front page blocks. An explicit slug in the payload takes the place of the
/// title as the slug source.
#[derive(Clone)]
pub struct FrontPartManager {
    repo: Arc<dyn SluggedRepository<FrontPart>>,
    slugs: SlugAllocator,
}

impl FrontPartManager {
    pub fn new(repo: Arc<dyn SluggedRepository<FrontPart>>, slugs: SlugAllocator) -> Self {
        Self { repo, slugs }
    }

    pub async fn create(&self, payload: FrontPartPayload) -> Result<FrontPart, AppError> {
        payload.validate()?;

        let mut part = FrontPart::new(payload.title.trim());
        let source = slug_source(&payload);
        part.slug = self
            .slugs
            .allocate(self.repo.as_slug_lookup(), source, None)
            .await?;
        apply(&mut part, &payload);

        self.repo.save(&part).await?;
        tracing::info!(id = %part.id, slug = %part.slug, "Front part created");
        Ok(part)
    }

    pub async fn update(&self, id: Uuid, payload: FrontPartPayload) -> Result<FrontPart, AppError> {
        payload.validate()?;

        let mut part = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Front part", id))?;

        part.title = payload.title.trim().to_string();

        // Reallocate when the slug is missing or an explicit one asks for a new base.
        let explicit = explicit_slug(&payload);
        let wants_new_base =
            explicit.is_some_and(|s| !derives_from(&part.slug, &self.slugs.base_slug(s)));
        if part.slug.is_empty() || wants_new_base {
            part.slug = self
                .slugs
                .allocate(self.repo.as_slug_lookup(), slug_source(&payload), Some(id))
                .await?;
        }
        apply(&mut part, &payload);

        self.repo.save(&part).await?;
        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Front part", id));
        }
        Ok(())
    }
}

fn explicit_slug(payload: &FrontPartPayload) -> Option<&str> {
    payload
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// `slug` is `base` or `base-<n>`.
fn derives_from(slug: &str, base: &str) -> bool {
    match slug.strip_prefix(base) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('-')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

fn slug_source(payload: &FrontPartPayload) -> &str {
    explicit_slug(payload).unwrap_or_else(|| payload.title.trim())
}

fn apply(part: &mut FrontPart, payload: &FrontPartPayload) {
    part.category_name = non_blank(payload.category_name.as_deref());
    part.kind = non_blank(payload.kind.as_deref());
    part.preview_text = non_blank(payload.preview_text.as_deref());
    part.detail_text = non_blank(payload.detail_text.as_deref());
    part.status = payload.status;
    part.url = non_blank(payload.url.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_from() {
        assert!(derives_from("hero", "hero"));
        assert!(derives_from("hero-3", "hero"));
        assert!(!derives_from("hero-banner", "hero"));
        assert!(!derives_from("hero-", "hero"));
        assert!(!derives_from("her", "hero"));
    }
}
