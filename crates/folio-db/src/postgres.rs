//! Postgres slug lookup
//!
//! The slug column must also carry a unique index: the allocator's read-then-write
//! check is only a pre-check, and two concurrent creates can still race.

use async_trait::async_trait;
use folio_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::traits::SlugLookup;

/// Tables with a `slug` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTable {
    Categories,
    Tags,
    Posts,
    Portfolio,
    Products,
    Orders,
    FrontParts,
}

impl ContentTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTable::Categories => "categories",
            ContentTable::Tags => "tags",
            ContentTable::Posts => "posts",
            ContentTable::Portfolio => "portfolio",
            ContentTable::Products => "products",
            ContentTable::Orders => "orders",
            ContentTable::FrontParts => "front_parts",
        }
    }

    fn slug_query(&self) -> String {
        format!("SELECT id FROM {} WHERE slug = $1 LIMIT 1", self.as_str())
    }
}

#[derive(Clone)]
pub struct PgSlugLookup {
    pool: PgPool,
    table: ContentTable,
}

impl PgSlugLookup {
    pub fn new(pool: PgPool, table: ContentTable) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl SlugLookup for PgSlugLookup {
    #[tracing::instrument(skip(self), fields(db.table = self.table.as_str(), db.operation = "select"))]
    async fn find_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>(&self.table.slug_query())
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}
