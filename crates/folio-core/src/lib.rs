//! Folio Core Library
//!
//! This crate provides the domain records, admin payloads, error types and
//! configuration shared by every Folio component.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::{UploadArea, UploadedFile};
