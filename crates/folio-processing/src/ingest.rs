use std::sync::Arc;

use folio_core::{UploadArea, UploadConfig, UploadedFile};
use folio_storage::{storage_key, Storage, StorageError};

use crate::filename::FileNameGenerator;
use crate::types::{StoredAsset, UploadError};
use crate::validator::UploadValidator;

/// Fresh names tried when a generated filename is already taken.
const MAX_NAME_ATTEMPTS: usize = 3;

/// Validates uploads, stores the accepted ones and removes files entities
/// no longer reference.
#[derive(Clone)]
pub struct UploadIngestor {
    validator: UploadValidator,
    names: FileNameGenerator,
    storage: Arc<dyn Storage>,
}

impl UploadIngestor {
    pub fn new(
        validator: UploadValidator,
        names: FileNameGenerator,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            validator,
            names,
            storage,
        }
    }

    pub fn from_config(
        config: &UploadConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, UploadError> {
        Ok(Self::new(
            UploadValidator::from_config(config)?,
            FileNameGenerator::new(config.random_suffix_bytes),
            storage,
        ))
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Validate `file` and write it into `area` under a generated name.
    ///
    /// Nothing is written unless every check passes.
    #[tracing::instrument(skip(self, file), fields(original_name = %file.original_name))]
    pub async fn ingest(
        &self,
        file: &UploadedFile,
        area: UploadArea,
    ) -> Result<StoredAsset, UploadError> {
        let upload = match self.validator.validate(file).await {
            Ok(upload) => upload,
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "Upload rejected");
                return Err(e);
            }
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            let filename = self.names.generate(&upload.extension);
            let key = storage_key(area, &filename);

            match self.storage.put(&key, &upload.bytes).await {
                Ok(url) => {
                    tracing::info!(
                        storage_key = %key,
                        mime_type = %upload.mime_type,
                        size_bytes = upload.size_bytes,
                        "Upload stored"
                    );
                    return Ok(StoredAsset {
                        area,
                        filename,
                        storage_key: key,
                        url,
                        mime_type: upload.mime_type,
                        size_bytes: upload.size_bytes,
                    });
                }
                Err(StorageError::AlreadyExists(_)) if attempt < MAX_NAME_ATTEMPTS => {
                    tracing::debug!(storage_key = %key, attempt, "Filename taken, retrying");
                }
                Err(e) => {
                    tracing::error!(storage_key = %key, error = %e, "Failed to store upload");
                    return Err(UploadError::StorageFailure(e));
                }
            }
        }
    }

    /// Delete a stored file. `None`, an empty name and an already missing
    /// file are all no-ops.
    pub async fn remove(&self, area: UploadArea, filename: Option<&str>) -> Result<(), UploadError> {
        let Some(filename) = filename.map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(());
        };

        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(UploadError::StorageFailure(StorageError::InvalidKey(
                filename.to_string(),
            )));
        }

        let key = storage_key(area, filename);
        self.storage.delete(&key).await?;
        tracing::debug!(storage_key = %key, "Upload removed");
        Ok(())
    }

    /// Store `file` as the replacement for `previous`.
    ///
    /// The old file stays on disk until [`StagedUpload::commit`] is called, which
    /// the caller does once the entity pointing at the new file has been saved.
    /// [`StagedUpload::rollback`] removes the new file instead.
    pub async fn stage(
        &self,
        file: &UploadedFile,
        area: UploadArea,
        previous: Option<&str>,
    ) -> Result<StagedUpload<'_>, UploadError> {
        let asset = self.ingest(file, area).await?;
        Ok(StagedUpload {
            ingestor: self,
            asset,
            previous: previous
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
    }
}

/// A stored upload whose owning entity has not been saved yet.
#[must_use = "call commit() after saving the entity or rollback() if the save failed"]
pub struct StagedUpload<'a> {
    ingestor: &'a UploadIngestor,
    asset: StoredAsset,
    previous: Option<String>,
}

impl StagedUpload<'_> {
    pub fn asset(&self) -> &StoredAsset {
        &self.asset
    }

    pub fn filename(&self) -> &str {
        &self.asset.filename
    }

    /// Drop the file that was replaced. Failure leaves an orphan and is only logged.
    pub async fn commit(self) -> StoredAsset {
        if let Some(previous) = self.previous.as_deref() {
            if previous != self.asset.filename {
                if let Err(e) = self.ingestor.remove(self.asset.area, Some(previous)).await {
                    tracing::warn!(
                        area = %self.asset.area,
                        filename = %previous,
                        error = %e,
                        "Failed to remove replaced upload"
                    );
                }
            }
        }
        self.asset
    }

    /// Remove the new file, keeping the previous one.
    pub async fn rollback(self) {
        if let Err(e) = self
            .ingestor
            .remove(self.asset.area, Some(self.asset.filename.as_str()))
            .await
        {
            tracing::warn!(
                storage_key = %self.asset.storage_key,
                error = %e,
                "Failed to clean up upload after failed save"
            );
        }
    }
}
