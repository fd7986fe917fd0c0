//! Folio Storage Library
//!
//! This crate provides the Storage trait and the local filesystem backend that
//! uploaded images are written to.
//!
//! # Storage key format
//!
//! Keys are `{area directory}/{filename}`, for example `uploads/portfolio/2024-05-01_10-00-00_ab12cd34ef56ab78.png`.
//! Keys must not contain `..` or a leading `/`. Key generation lives in the `keys`
//! module so every caller builds them the same way.

pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
