//! Content sniffing.
//!
//! The declared MIME type and the filename are both client controlled, so the
//! bytes are decoded to find out what the file really is.

use std::io::Cursor;

use image::ImageReader;

use crate::types::UploadError;

/// What the decoder found in an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffedImage {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// Detect the image format from magic bytes and decode the whole image.
///
/// CPU bound; call from `tokio::task::spawn_blocking`.
pub fn sniff_image(data: &[u8]) -> Result<SniffedImage, UploadError> {
    if data.is_empty() {
        return Err(UploadError::InvalidImageContent("file is empty".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| UploadError::InvalidImageContent(e.to_string()))?;

    let format = reader.format().ok_or_else(|| {
        UploadError::InvalidImageContent("unrecognized image format".to_string())
    })?;

    let img = reader
        .decode()
        .map_err(|e| UploadError::InvalidImageContent(format!("failed to decode image: {}", e)))?;

    Ok(SniffedImage {
        mime_type: format.to_mime_type().to_string(),
        width: img.width(),
        height: img.height(),
    })
}
