use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::models::{Post, PostLike};
use folio_core::AppError;
use folio_db::{PostLikeRepository, Repository};
use uuid::Uuid;

use super::not_found;

/// Anonymous likes on posts.
#[derive(Clone)]
pub struct PostLikeManager {
    likes: Arc<dyn PostLikeRepository>,
    posts: Arc<dyn Repository<Post>>,
}

impl PostLikeManager {
    pub fn new(likes: Arc<dyn PostLikeRepository>, posts: Arc<dyn Repository<Post>>) -> Self {
        Self { likes, posts }
    }

    pub async fn add_like(
        &self,
        post_id: Uuid,
        device_memory: Option<i32>,
    ) -> Result<PostLike, AppError> {
        if self.posts.find(post_id).await?.is_none() {
            return Err(not_found("Post", post_id));
        }

        let mut like = PostLike::new(post_id);
        like.device_memory = device_memory;

        self.likes.save(&like).await?;
        tracing::info!(id = %like.id, post_id = %post_id, "Post liked");
        Ok(like)
    }

    /// Undo the like created at `created_at`. Nothing matching is not an error.
    pub async fn remove_like_for_post_at(
        &self,
        post_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let removed = self.likes.delete_for_post_at(post_id, created_at).await?;
        tracing::info!(post_id = %post_id, removed, "Post like removed");
        Ok(removed)
    }
}
