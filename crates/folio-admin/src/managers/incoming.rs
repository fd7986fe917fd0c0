use std::sync::Arc;

use folio_core::models::Incoming;
use folio_core::AppError;
use folio_db::Repository;
use uuid::Uuid;

use super::not_found;

/// Moderation of contact form messages.
#[derive(Clone)]
pub struct IncomingManager {
    incomings: Arc<dyn Repository<Incoming>>,
}

impl IncomingManager {
    pub fn new(incomings: Arc<dyn Repository<Incoming>>) -> Self {
        Self { incomings }
    }

    pub async fn toggle_status(&self, id: Uuid) -> Result<Incoming, AppError> {
        let mut incoming = self
            .incomings
            .find(id)
            .await?
            .ok_or_else(|| not_found("Incoming message", id))?;

        incoming.status = !incoming.status;
        self.incomings.save(&incoming).await?;
        tracing::info!(id = %id, status = incoming.status, "Incoming message status toggled");
        Ok(incoming)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.incomings.delete(id).await? {
            return Err(not_found("Incoming message", id));
        }
        Ok(())
    }
}
