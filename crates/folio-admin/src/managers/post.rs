use std::sync::Arc;

use chrono::Utc;
use folio_core::form::{parse_form_date, parse_id_list};
use folio_core::models::{Category, Post, PostPayload, Tag};
use folio_core::{AppError, UploadArea};
use folio_db::{Repository, SluggedRepository};
use folio_processing::UploadIngestor;
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, known_category, non_blank, not_found, save_with_uploads, start_of_day};
use crate::guard::Actor;
use crate::slug::SlugAllocator;

#[derive(Clone)]
pub struct PostManager {
    posts: Arc<dyn SluggedRepository<Post>>,
    categories: Arc<dyn Repository<Category>>,
    tags: Arc<dyn Repository<Tag>>,
    uploads: UploadIngestor,
    slugs: SlugAllocator,
}

impl PostManager {
    pub fn new(
        posts: Arc<dyn SluggedRepository<Post>>,
        categories: Arc<dyn Repository<Category>>,
        tags: Arc<dyn Repository<Tag>>,
        uploads: UploadIngestor,
        slugs: SlugAllocator,
    ) -> Self {
        Self {
            posts,
            categories,
            tags,
            uploads,
            slugs,
        }
    }

    #[tracing::instrument(skip(self, payload, author), fields(title = %payload.title, author_id = %author.id))]
    pub async fn create(&self, payload: PostPayload, author: &Actor) -> Result<Post, AppError> {
        payload.validate()?;

        let mut post = Post::new(payload.title.trim());
        post.author_id = Some(author.id);
        assign_slug(
            &self.slugs,
            self.posts.as_slug_lookup(),
            &mut post.slug,
            &post.title,
            None,
        )
        .await?;

        self.apply(&mut post, &payload).await?;
        self.store(post, &payload).await
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: PostPayload) -> Result<Post, AppError> {
        payload.validate()?;

        let mut post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| not_found("Post", id))?;

        post.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.posts.as_slug_lookup(),
            &mut post.slug,
            &post.title,
            Some(id),
        )
        .await?;

        self.apply(&mut post, &payload).await?;
        self.store(post, &payload).await
    }

    /// Delete the post, then its cover image.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| not_found("Post", id))?;

        self.posts.delete(id).await?;
        if let Err(e) = self
            .uploads
            .remove(UploadArea::Posts, post.image.as_deref())
            .await
        {
            tracing::warn!(id = %id, error = %e, "Post deleted but its image could not be removed");
        }

        tracing::info!(id = %id, "Post deleted");
        Ok(())
    }

    async fn apply(&self, post: &mut Post, payload: &PostPayload) -> Result<(), AppError> {
        post.content = non_blank(payload.content.as_deref());
        post.description = non_blank(payload.description.as_deref());
        post.status = payload.status;
        post.is_featured = payload.is_featured;

        if let Some(date) = parse_form_date(payload.date.as_deref())?.and_then(start_of_day) {
            post.created_at = date;
        }

        if let Some(category_id) =
            known_category(self.categories.as_ref(), payload.category_id).await?
        {
            post.category_id = Some(category_id);
        }

        // The submitted tag list replaces the current one; unknown ids drop out.
        let tag_ids = parse_id_list(&payload.tags)?;
        post.tag_ids = if tag_ids.is_empty() {
            Vec::new()
        } else {
            self.tags
                .find_many(&tag_ids)
                .await?
                .into_iter()
                .map(|tag| tag.id)
                .collect()
        };

        post.updated_at = Utc::now();
        Ok(())
    }

    async fn store(&self, mut post: Post, payload: &PostPayload) -> Result<Post, AppError> {
        let mut staged = Vec::new();
        if let Some(file) = payload.image.as_ref() {
            let upload = self
                .uploads
                .stage(file, UploadArea::Posts, post.image.as_deref())
                .await?;
            post.image = Some(upload.filename().to_string());
            staged.push(upload);
        }

        save_with_uploads(self.posts.as_ref(), &post, staged).await?;
        tracing::info!(id = %post.id, slug = %post.slug, "Post saved");
        Ok(post)
    }
}
