use std::sync::Arc;

use folio_core::models::{SubscriberPayload, Subscription};
use folio_core::AppError;
use folio_db::{Repository, SubscriptionRepository};
use uuid::Uuid;
use validator::Validate;

use super::not_found;

#[derive(Clone)]
pub struct SubscriberManager {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriberManager {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Subscribe `payload.email`. An address that is already subscribed is a `Conflict`.
    pub async fn create(&self, payload: SubscriberPayload) -> Result<Subscription, AppError> {
        let email = payload.email.trim().to_string();
        SubscriberPayload {
            email: email.clone(),
        }
        .validate()?;

        if self.subscriptions.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "This email is already subscribed".to_string(),
            ));
        }

        let subscription = Subscription::new(email);
        self.subscriptions.save(&subscription).await?;
        tracing::info!(id = %subscription.id, "Subscriber added");
        Ok(subscription)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.subscriptions.delete(id).await? {
            return Err(not_found("Subscription", id));
        }
        Ok(())
    }
}
