use std::sync::Arc;

use folio_core::models::Post;
use folio_core::AppError;
use folio_db::Repository;
use uuid::Uuid;

use super::not_found;

#[derive(Clone)]
pub struct PostViewManager {
    posts: Arc<dyn Repository<Post>>,
}

impl PostViewManager {
    pub fn new(posts: Arc<dyn Repository<Post>>) -> Self {
        Self { posts }
    }

    /// Count one view of the post and return the new total.
    ///
    /// Load and save are separate statements, so concurrent views of the same
    /// post can be counted once.
    pub async fn increment(&self, post_id: Uuid) -> Result<u64, AppError> {
        let mut post = self
            .posts
            .find(post_id)
            .await?
            .ok_or_else(|| not_found("Post", post_id))?;

        post.views_count = post.views_count.saturating_add(1);
        self.posts.save(&post).await?;
        tracing::debug!(post_id = %post_id, views = post.views_count, "Post view counted");
        Ok(post.views_count)
    }
}
