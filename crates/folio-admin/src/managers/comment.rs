use std::sync::Arc;

use chrono::Utc;
use folio_core::models::{Comment, Post, ANONYMOUS_AUTHOR_NAME};
use folio_core::AppError;
use folio_db::Repository;
use uuid::Uuid;

use super::not_found;
use crate::guard::Actor;

const MAX_COMMENT_LENGTH: usize = 5000;

/// Reader comments and their moderation.
#[derive(Clone)]
pub struct CommentManager {
    comments: Arc<dyn Repository<Comment>>,
    posts: Arc<dyn Repository<Post>>,
}

impl CommentManager {
    pub fn new(comments: Arc<dyn Repository<Comment>>, posts: Arc<dyn Repository<Post>>) -> Self {
        Self { comments, posts }
    }

    /// New comments start unapproved. Without an actor the author is recorded as `anon`.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        actor: Option<&Actor>,
        text: &str,
    ) -> Result<Comment, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Comment text is required".to_string()));
        }
        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Comment must be at most {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        if self.posts.find(post_id).await?.is_none() {
            return Err(not_found("Post", post_id));
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id: actor.map(|a| a.id),
            author_name: actor
                .map(|a| a.name.clone())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR_NAME.to_string()),
            text: text.to_string(),
            status: false,
            created_at: Utc::now(),
        };

        self.comments.save(&comment).await?;
        tracing::info!(id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    pub async fn toggle_status(&self, id: Uuid) -> Result<Comment, AppError> {
        let mut comment = self
            .comments
            .find(id)
            .await?
            .ok_or_else(|| not_found("Comment", id))?;

        comment.status = !comment.status;
        self.comments.save(&comment).await?;
        tracing::info!(id = %id, status = comment.status, "Comment status toggled");
        Ok(comment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.comments.delete(id).await? {
            return Err(not_found("Comment", id));
        }
        Ok(())
    }
}
