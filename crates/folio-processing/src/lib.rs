//! Upload ingestion for Folio
//!
//! Turns an untrusted uploaded file into a stored asset, or rejects it:
//!
//! ```text
//! RECEIVED -> VALIDATING -> { ACCEPTED, REJECTED }
//! ACCEPTED -> STORED
//! ```
//!
//! [`UploadValidator`] runs the checks, [`FileNameGenerator`] names accepted
//! files and [`UploadIngestor`] writes them through a `folio_storage::Storage`
//! backend and removes files that are replaced or orphaned.

pub mod filename;
pub mod ingest;
pub mod sniff;
pub mod types;
pub mod validator;

pub use filename::FileNameGenerator;
pub use ingest::{StagedUpload, UploadIngestor};
pub use types::{StoredAsset, UploadError, ValidatedUpload};
pub use validator::{AllowList, UploadValidator};
