//! Shared key generation for storage backends.

use folio_core::UploadArea;

/// Storage key for `filename` inside `area`: `{area directory}/{filename}`.
pub fn storage_key(area: UploadArea, filename: &str) -> String {
    format!("{}/{}", area.directory(), filename)
}
