//! Admin managers
//!
//! One manager per record type. Each validates the payload, applies it to a
//! loaded (or new) record, stores uploads and saves. Uploaded files are
//! written before the record is saved and replaced files are deleted after,
//! so a saved record never points at a missing file.

mod category;
mod comment;
mod front_part;
mod incoming;
mod order;
mod portfolio;
mod post;
mod post_like;
mod post_view;
mod product;
mod subscriber;
mod tag;
mod user;

pub use category::CategoryManager;
pub use comment::CommentManager;
pub use front_part::FrontPartManager;
pub use incoming::IncomingManager;
pub use order::OrderManager;
pub use portfolio::PortfolioManager;
pub use post::PostManager;
pub use post_like::PostLikeManager;
pub use post_view::PostViewManager;
pub use product::ProductManager;
pub use subscriber::SubscriberManager;
pub use tag::TagManager;
pub use user::UserManager;

use chrono::{DateTime, NaiveDate, Utc};
use folio_core::models::{Category, Entity};
use folio_core::AppError;
use folio_db::{Repository, SlugLookup};
use folio_processing::StagedUpload;
use uuid::Uuid;

use crate::slug::SlugAllocator;

/// Give a new record a slug, or an existing one whose slug is empty.
pub(crate) async fn assign_slug(
    slugs: &SlugAllocator,
    lookup: &dyn SlugLookup,
    slug: &mut String,
    source: &str,
    current_id: Option<Uuid>,
) -> Result<(), AppError> {
    if current_id.is_some() && !slug.is_empty() {
        return Ok(());
    }
    *slug = slugs.allocate(lookup, source, current_id).await?;
    Ok(())
}

/// Save `entity`, then commit or roll back the uploads it references.
pub(crate) async fn save_with_uploads<T, R>(
    repo: &R,
    entity: &T,
    staged: Vec<StagedUpload<'_>>,
) -> Result<(), AppError>
where
    T: Entity,
    R: Repository<T> + ?Sized,
{
    if let Err(e) = repo.save(entity).await {
        tracing::error!(id = %entity.id(), error = %e, "Save failed, discarding new uploads");
        for upload in staged {
            upload.rollback().await;
        }
        return Err(e);
    }

    for upload in staged {
        upload.commit().await;
    }
    Ok(())
}

/// `Some(id)` when the category exists. Unknown ids are ignored.
pub(crate) async fn known_category(
    categories: &dyn Repository<Category>,
    id: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    let Some(id) = id else {
        return Ok(None);
    };
    match categories.find(id).await? {
        Some(category) => Ok(Some(category.id)),
        None => {
            tracing::debug!(category_id = %id, "Ignoring unknown category");
            Ok(None)
        }
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// Empty or whitespace-only form text is stored as `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

pub(crate) fn not_found(kind: &str, id: Uuid) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}
