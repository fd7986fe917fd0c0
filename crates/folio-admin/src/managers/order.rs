use std::sync::Arc;

use chrono::Utc;
use folio_core::models::{Order, OrderPayload};
use folio_core::AppError;
use folio_db::{Repository, SluggedRepository};
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, non_blank, not_found};
use crate::slug::SlugAllocator;

#[derive(Clone)]
pub struct OrderManager {
    repo: Arc<dyn SluggedRepository<Order>>,
    slugs: SlugAllocator,
}

impl OrderManager {
    pub fn new(repo: Arc<dyn SluggedRepository<Order>>, slugs: SlugAllocator) -> Self {
        Self { repo, slugs }
    }

    pub async fn create(&self, payload: OrderPayload) -> Result<Order, AppError> {
        payload.validate()?;

        let mut order = Order::new(payload.title.trim());
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut order.slug,
            &order.title,
            None,
        )
        .await?;
        apply(&mut order, &payload);

        self.repo.save(&order).await?;
        tracing::info!(id = %order.id, slug = %order.slug, "Order created");
        Ok(order)
    }

    pub async fn update(&self, id: Uuid, payload: OrderPayload) -> Result<Order, AppError> {
        payload.validate()?;

        let mut order = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| not_found("Order", id))?;

        order.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.repo.as_slug_lookup(),
            &mut order.slug,
            &order.title,
            Some(id),
        )
        .await?;
        apply(&mut order, &payload);

        self.repo.save(&order).await?;
        Ok(order)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Order", id));
        }
        Ok(())
    }
}

fn apply(order: &mut Order, payload: &OrderPayload) {
    if let Some(price) = payload.price {
        order.price = price;
    }
    if let Some(status) = payload.status {
        order.status = status;
    }
    order.phone = non_blank(payload.phone.as_deref());
    order.address = non_blank(payload.address.as_deref());
    order.notes = non_blank(payload.notes.as_deref());
    order.contents = non_blank(payload.contents.as_deref());
    order.contents_json = non_blank(payload.contents_json.as_deref());
    order.manager = non_blank(payload.manager.as_deref());
    order.updated_at = Utc::now();
}
