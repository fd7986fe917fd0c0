//! Types for the upload pipeline.

use folio_core::{AppError, UploadArea};
use folio_storage::StorageError;
use serde::Serialize;

/// Why an upload was rejected or could not be stored.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Uploaded file not found: {0}")]
    NotFound(String),

    #[error("File MIME type \"{0}\" is not allowed")]
    UnsupportedType(String),

    #[error("File size {size} exceeds maximum allowed size {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("File extension \".{extension}\" does not match MIME type \"{mime_type}\"")]
    ExtensionMismatch {
        extension: String,
        mime_type: String,
    },

    #[error("File is not a valid image: {0}")]
    InvalidImageContent(String),

    #[error("Failed to store file: {0}")]
    StorageFailure(#[from] StorageError),
}

impl UploadError {
    /// Stable machine-readable code for the rejection reason.
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::NotFound(_) => "UPLOAD_NOT_FOUND",
            UploadError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            UploadError::TooLarge { .. } => "FILE_TOO_LARGE",
            UploadError::ExtensionMismatch { .. } => "EXTENSION_MISMATCH",
            UploadError::InvalidImageContent(_) => "INVALID_IMAGE_CONTENT",
            UploadError::StorageFailure(_) => "STORAGE_FAILURE",
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            UploadError::StorageFailure(ref inner) => AppError::Storage(inner.to_string()),
            _ => AppError::InvalidUpload {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

/// A file that passed every check and is ready to be written.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub bytes: Vec<u8>,
    /// Lowercased extension from the client filename, registered for `mime_type`
    pub extension: String,
    /// MIME type detected from the decoded content
    pub mime_type: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
}

/// A file written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    pub area: UploadArea,
    /// Generated filename, the value kept on the owning entity
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}
