use std::sync::Arc;

use chrono::Utc;
use folio_core::form::parse_form_date;
use folio_core::models::{Category, Product, ProductPayload, ProductPicture};
use folio_core::{AppError, UploadArea};
use folio_db::{Repository, SluggedRepository};
use folio_processing::UploadIngestor;
use uuid::Uuid;
use validator::Validate;

use super::{assign_slug, known_category, non_blank, not_found, save_with_uploads};
use crate::guard::Actor;
use crate::slug::SlugAllocator;

const PICTURES: [ProductPicture; 2] = [ProductPicture::Preview, ProductPicture::Detail];

/// Products keep two pictures, both stored in the shop upload area.
#[derive(Clone)]
pub struct ProductManager {
    products: Arc<dyn SluggedRepository<Product>>,
    categories: Arc<dyn Repository<Category>>,
    uploads: UploadIngestor,
    slugs: SlugAllocator,
}

impl ProductManager {
    pub fn new(
        products: Arc<dyn SluggedRepository<Product>>,
        categories: Arc<dyn Repository<Category>>,
        uploads: UploadIngestor,
        slugs: SlugAllocator,
    ) -> Self {
        Self {
            products,
            categories,
            uploads,
            slugs,
        }
    }

    pub async fn create(&self, payload: ProductPayload, author: &Actor) -> Result<Product, AppError> {
        payload.validate()?;

        let mut product = Product::new(payload.title.trim());
        product.author_id = Some(author.id);
        assign_slug(
            &self.slugs,
            self.products.as_slug_lookup(),
            &mut product.slug,
            &product.title,
            None,
        )
        .await?;

        self.apply(&mut product, &payload).await?;
        self.store(product, &payload).await
    }

    pub async fn update(&self, id: Uuid, payload: ProductPayload) -> Result<Product, AppError> {
        payload.validate()?;

        let mut product = self
            .products
            .find(id)
            .await?
            .ok_or_else(|| not_found("Product", id))?;

        product.title = payload.title.trim().to_string();
        assign_slug(
            &self.slugs,
            self.products.as_slug_lookup(),
            &mut product.slug,
            &product.title,
            Some(id),
        )
        .await?;

        self.apply(&mut product, &payload).await?;
        self.store(product, &payload).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let product = self
            .products
            .find(id)
            .await?
            .ok_or_else(|| not_found("Product", id))?;

        self.products.delete(id).await?;
        for which in PICTURES {
            if let Err(e) = self
                .uploads
                .remove(UploadArea::Shop, product.picture(which))
                .await
            {
                tracing::warn!(id = %id, picture = ?which, error = %e, "Product deleted but a picture could not be removed");
            }
        }
        Ok(())
    }

    async fn apply(&self, product: &mut Product, payload: &ProductPayload) -> Result<(), AppError> {
        product.detail_text = non_blank(payload.detail_text.as_deref());
        product.preview_text = non_blank(payload.preview_text.as_deref());
        product.composition = non_blank(payload.composition.as_deref());
        product.features = non_blank(payload.features.as_deref());
        product.size = non_blank(payload.size.as_deref());
        product.manufacturer = non_blank(payload.manufacturer.as_deref());
        product.delivery = non_blank(payload.delivery.as_deref());

        if let Some(price) = payload.price {
            product.price = price;
        }
        if let Some(balance) = payload.balance {
            product.balance = balance;
        }
        if payload.stars.is_some() {
            product.stars = payload.stars;
        }
        if let Some(date) = parse_form_date(payload.date.as_deref())? {
            product.date = Some(date);
        }

        if let Some(category_id) =
            known_category(self.categories.as_ref(), payload.category_id).await?
        {
            product.category_id = Some(category_id);
        }

        product.updated_at = Utc::now();
        Ok(())
    }

    async fn store(&self, mut product: Product, payload: &ProductPayload) -> Result<Product, AppError> {
        let mut staged = Vec::new();
        for which in PICTURES {
            let file = match which {
                ProductPicture::Preview => payload.preview_picture.as_ref(),
                ProductPicture::Detail => payload.detail_picture.as_ref(),
            };
            let Some(file) = file else {
                continue;
            };

            match self
                .uploads
                .stage(file, UploadArea::Shop, product.picture(which))
                .await
            {
                Ok(upload) => {
                    product.set_picture(which, Some(upload.filename().to_string()));
                    staged.push(upload);
                }
                Err(e) => {
                    // Neither picture changes if one of them is rejected.
                    for upload in staged {
                        upload.rollback().await;
                    }
                    return Err(e.into());
                }
            }
        }

        save_with_uploads(self.products.as_ref(), &product, staged).await?;
        tracing::info!(id = %product.id, slug = %product.slug, "Product saved");
        Ok(product)
    }
}
