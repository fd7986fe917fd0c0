//! Slug allocation
//!
//! A slug is the slugified title, suffixed `-2`, `-3`, ... until no other record
//! of the same type holds it. Uniqueness is a read-then-write pre-check; the
//! database unique constraint on `slug` is what actually enforces it.

use folio_core::constants::DEFAULT_SLUG_MAX_LENGTH;
use folio_core::{AppError, Config};
use folio_db::SlugLookup;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix for slugs of titles that contain nothing slugifiable.
const FALLBACK_PREFIX: &str = "item";

#[derive(Debug, thiserror::Error)]
pub enum SlugGenerationError {
    #[error("Slug lookup failed: {0}")]
    Lookup(#[from] AppError),

    #[error("Ran out of numeric suffixes for slug \"{0}\"")]
    Exhausted(String),
}

impl From<SlugGenerationError> for AppError {
    fn from(err: SlugGenerationError) -> Self {
        match err {
            SlugGenerationError::Lookup(inner) => inner,
            SlugGenerationError::Exhausted(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SlugAllocator {
    max_length: usize,
}

impl Default for SlugAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_SLUG_MAX_LENGTH)
    }
}

impl SlugAllocator {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.slug_max_length)
    }

    /// Deterministic base slug for `title`.
    ///
    /// Titles with nothing slugifiable (`"!!!"`) map to `item-<8 hex chars of
    /// sha256(title)>`, so distinct titles still get distinct bases.
    pub fn base_slug(&self, title: &str) -> String {
        let mut base = slug::slugify(title);
        if base.len() > self.max_length {
            // slugify output is ASCII, so any byte index is a char boundary
            base.truncate(self.max_length);
            base.truncate(base.trim_end_matches('-').len());
        }

        if base.is_empty() {
            let digest = hex::encode(Sha256::digest(title.as_bytes()));
            return format!("{}-{}", FALLBACK_PREFIX, &digest[..8]);
        }
        base
    }

    /// First free candidate among `base`, `base-2`, `base-3`, ...
    ///
    /// A candidate held by `current_id` counts as free, so re-saving a record
    /// keeps its slug.
    #[tracing::instrument(skip(self, lookup), fields(slug.base))]
    pub async fn allocate(
        &self,
        lookup: &dyn SlugLookup,
        title: &str,
        current_id: Option<Uuid>,
    ) -> Result<String, SlugGenerationError> {
        let base = self.base_slug(title);
        tracing::Span::current().record("slug.base", base.as_str());

        let mut candidate = base.clone();
        let mut suffix: u64 = 2;

        loop {
            match lookup.find_id_by_slug(&candidate).await? {
                None => break,
                Some(owner) if Some(owner) == current_id => break,
                Some(_) => {}
            }

            candidate = format!("{}-{}", base, suffix);
            suffix = suffix
                .checked_add(1)
                .ok_or_else(|| SlugGenerationError::Exhausted(base.clone()))?;
        }

        tracing::debug!(slug = %candidate, "Slug allocated");
        Ok(candidate)
    }
}
