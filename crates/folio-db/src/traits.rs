//! Repository traits
//!
//! Every method maps to one statement plus commit; there is no unit of work and
//! no lazy loading. Callers load a record, change it and hand it back to `save`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::models::{Entity, PostLike, Sluggable, Subscription};
use folio_core::AppError;
use uuid::Uuid;

/// "Who owns this slug?" query supplied by the persistence layer.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// Id of the record currently holding `slug`, if any.
    async fn find_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError>;
}

/// Basic CRUD over one record type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<T>, AppError>;

    /// Records for the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<T>, AppError>;

    /// Insert or replace the record with `entity.id()`.
    async fn save(&self, entity: &T) -> Result<(), AppError>;

    /// Remove the record. Returns `false` when it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// A repository for a slugged record type that can also answer slug lookups.
pub trait SluggedRepository<T: Sluggable>: Repository<T> + SlugLookup {
    fn as_slug_lookup(&self) -> &dyn SlugLookup;
}

impl<T, R> SluggedRepository<T> for R
where
    T: Sluggable,
    R: Repository<T> + SlugLookup,
{
    fn as_slug_lookup(&self) -> &dyn SlugLookup {
        self
    }
}

/// Subscriptions, which are unique by email.
#[async_trait]
pub trait SubscriptionRepository: Repository<Subscription> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscription>, AppError>;
}

#[async_trait]
pub trait PostLikeRepository: Repository<PostLike> {
    /// Delete the likes of `post_id` created at `created_at`. Returns how many were removed.
    async fn delete_for_post_at(
        &self,
        post_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<u64, AppError>;
}
