//! In-memory repository
//!
//! Keeps records in a shared map. Used by the test suites and by the CLI, where
//! no database is available.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::models::{Entity, PostLike, Sluggable, Subscription};
use folio_core::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::traits::{PostLikeRepository, Repository, SlugLookup, SubscriptionRepository};

#[derive(Clone)]
pub struct InMemoryRepository<T> {
    records: Arc<Mutex<HashMap<Uuid, T>>>,
    fail_saves: Arc<AtomicBool>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            fail_saves: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `save` fail, as a lost database connection would.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, T>>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::Internal("in-memory repository lock poisoned".to_string()))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find(&self, id: Uuid) -> Result<Option<T>, AppError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<T>, AppError> {
        let records = self.lock()?;
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn save(&self, entity: &T) -> Result<(), AppError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "in-memory repository configured to fail saves".to_string(),
            ));
        }
        self.lock()?.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}

#[async_trait]
impl<T: Sluggable> SlugLookup for InMemoryRepository<T> {
    async fn find_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .lock()?
            .values()
            .find(|record| record.slug() == slug)
            .map(|record| record.id()))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryRepository<Subscription> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscription>, AppError> {
        Ok(self
            .lock()?
            .values()
            .find(|subscription| subscription.email == email)
            .cloned())
    }
}

#[async_trait]
impl PostLikeRepository for InMemoryRepository<PostLike> {
    async fn delete_for_post_at(
        &self,
        post_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|_, like| !(like.post_id == post_id && like.created_at == created_at));
        Ok((before - records.len()) as u64)
    }
}

/// A fixed set of taken slugs, each owned by some record other than the caller.
#[derive(Debug, Clone, Default)]
pub struct TakenSlugs {
    owners: HashMap<String, Uuid>,
}

impl TakenSlugs {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owners: slugs
                .into_iter()
                .map(|s| (s.into(), Uuid::new_v4()))
                .collect(),
        }
    }
}

#[async_trait]
impl SlugLookup for TakenSlugs {
    async fn find_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.owners.get(slug).copied())
    }
}
