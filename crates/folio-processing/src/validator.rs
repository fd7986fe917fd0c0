use folio_core::constants::{extensions_for, IMAGE_TYPE_EXTENSIONS};
use folio_core::{UploadConfig, UploadedFile};

use crate::sniff::{sniff_image, SniffedImage};
use crate::types::{UploadError, ValidatedUpload};

/// Strip parameters (`; charset=...`) and lowercase a MIME type.
pub fn normalize_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Image MIME types accepted for upload and the extensions registered for each.
#[derive(Debug, Clone)]
pub struct AllowList {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self {
            entries: IMAGE_TYPE_EXTENSIONS
                .iter()
                .map(|(mime, exts)| {
                    (
                        mime.to_string(),
                        exts.iter().map(|e| e.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl AllowList {
    /// Restrict the list to `mime_types`. Unknown types are rejected.
    pub fn from_mime_types<S: AsRef<str>>(mime_types: &[S]) -> Result<Self, UploadError> {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for raw in mime_types {
            let mime = normalize_mime_type(raw.as_ref());
            let exts = extensions_for(&mime)
                .ok_or_else(|| UploadError::UnsupportedType(mime.clone()))?;
            if entries.iter().any(|(m, _)| *m == mime) {
                continue;
            }
            entries.push((mime, exts.iter().map(|e| e.to_string()).collect()));
        }
        Ok(Self { entries })
    }

    pub fn contains(&self, mime_type: &str) -> bool {
        self.extensions_for(mime_type).is_some()
    }

    pub fn extensions_for(&self, mime_type: &str) -> Option<&[String]> {
        let mime = normalize_mime_type(mime_type);
        self.entries
            .iter()
            .find(|(m, _)| *m == mime)
            .map(|(_, exts)| exts.as_slice())
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(m, _)| m.as_str())
    }
}

/// Decides whether an uploaded file may be stored.
///
/// Checks run in order and the first failure wins:
/// 1. the temporary file exists
/// 2. the declared MIME type is allow-listed
/// 3. the size is within the ceiling (inclusive)
/// 4. the filename extension is registered for the declared MIME type
/// 5. the content decodes as an allow-listed image whose type also accepts the extension
#[derive(Debug, Clone)]
pub struct UploadValidator {
    allow_list: AllowList,
    max_file_size: u64,
}

impl UploadValidator {
    pub fn new(allow_list: AllowList, max_file_size: u64) -> Self {
        Self {
            allow_list,
            max_file_size,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Result<Self, UploadError> {
        Ok(Self::new(
            AllowList::from_mime_types(&config.allowed_content_types[..])?,
            config.max_file_size_bytes,
        ))
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub async fn validate(&self, file: &UploadedFile) -> Result<ValidatedUpload, UploadError> {
        let not_found = || UploadError::NotFound(file.path.display().to_string());

        let metadata = tokio::fs::metadata(&file.path)
            .await
            .map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        let declared = self.validate_mime_type(&file.mime_type)?;
        self.validate_size(metadata.len())?;
        let extension = self.validate_extension(file, &declared)?;

        let bytes = tokio::fs::read(&file.path).await.map_err(|_| not_found())?;
        // The file may have grown since the metadata call.
        self.validate_size(bytes.len() as u64)?;

        let (bytes, sniffed) = tokio::task::spawn_blocking(move || {
            let sniffed = sniff_image(&bytes);
            (bytes, sniffed)
        })
        .await
        .map_err(|e| UploadError::InvalidImageContent(format!("decoder task failed: {}", e)))?;
        let sniffed = sniffed?;

        self.validate_content(&sniffed, &extension)?;

        tracing::debug!(
            original_name = %file.original_name,
            declared_mime = %declared,
            sniffed_mime = %sniffed.mime_type,
            size_bytes = bytes.len(),
            width = sniffed.width,
            height = sniffed.height,
            "Upload passed validation"
        );

        Ok(ValidatedUpload {
            size_bytes: bytes.len() as u64,
            bytes,
            extension,
            mime_type: sniffed.mime_type,
            width: sniffed.width,
            height: sniffed.height,
        })
    }

    /// Returns the normalized MIME type.
    pub fn validate_mime_type(&self, mime_type: &str) -> Result<String, UploadError> {
        let normalized = normalize_mime_type(mime_type);
        if !self.allow_list.contains(&normalized) {
            return Err(UploadError::UnsupportedType(mime_type.to_string()));
        }
        Ok(normalized)
    }

    pub fn validate_size(&self, size: u64) -> Result<(), UploadError> {
        if size > self.max_file_size {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Returns the lowercased extension of the client filename.
    pub fn validate_extension(
        &self,
        file: &UploadedFile,
        mime_type: &str,
    ) -> Result<String, UploadError> {
        let extension = file.declared_extension().unwrap_or_default();
        let registered = self
            .allow_list
            .extensions_for(mime_type)
            .is_some_and(|exts| exts.iter().any(|e| *e == extension));

        if extension.is_empty() || !registered {
            return Err(UploadError::ExtensionMismatch {
                extension,
                mime_type: mime_type.to_string(),
            });
        }
        Ok(extension)
    }

    /// The sniffed type must be allow-listed and accept the declared extension.
    pub fn validate_content(
        &self,
        sniffed: &SniffedImage,
        extension: &str,
    ) -> Result<(), UploadError> {
        let Some(exts) = self.allow_list.extensions_for(&sniffed.mime_type) else {
            return Err(UploadError::InvalidImageContent(format!(
                "content is {}, which is not an allowed image type",
                sniffed.mime_type
            )));
        };

        if !exts.iter().any(|e| e == extension) {
            return Err(UploadError::InvalidImageContent(format!(
                "content is {} but the file is named .{}",
                sniffed.mime_type, extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 128, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn gif_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Gif).unwrap();
        buf.into_inner()
    }

    fn spool(dir: &Path, data: &[u8]) -> std::path::PathBuf {
        let path = dir.join("upload.tmp");
        std::fs::write(&path, data).unwrap();
        path
    }

    fn validator(max: u64) -> UploadValidator {
        UploadValidator::new(AllowList::default(), max)
    }

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("Image/PNG; charset=binary"), "image/png");
        assert_eq!(normalize_mime_type(""), "");
    }

    #[test]
    fn test_allow_list_restriction() {
        let list = AllowList::from_mime_types(&["image/png", "IMAGE/PNG"]).unwrap();
        assert!(list.contains("image/png"));
        assert!(!list.contains("image/jpeg"));
        assert_eq!(list.mime_types().count(), 1);

        assert!(matches!(
            AllowList::from_mime_types(&["image/svg+xml"]),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_accepts_png() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), &png_bytes());
        let file = UploadedFile::new(path, "cover.PNG", "image/png");

        let upload = validator(1024 * 1024).validate(&file).await.unwrap();
        assert_eq!(upload.extension, "png");
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!((upload.width, upload.height), (8, 8));
        assert_eq!(upload.size_bytes, upload.bytes.len() as u64);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let file = UploadedFile::new(dir.path().join("gone.tmp"), "a.png", "image/png");
        let result = validator(1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let file = UploadedFile::new(dir.path(), "a.png", "image/png");
        let result = validator(1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unsupported_declared_type() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), b"MZ\x90\x00");
        let file = UploadedFile::new(path, "setup.exe", "application/x-msdownload");
        let result = validator(1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_extension_mismatch() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), &png_bytes());

        let file = UploadedFile::new(path.clone(), "photo.exe", "image/png");
        let result = validator(1024 * 1024).validate(&file).await;
        assert!(matches!(
            result,
            Err(UploadError::ExtensionMismatch { ref extension, .. }) if extension == "exe"
        ));

        let file = UploadedFile::new(path, "photo", "image/png");
        let result = validator(1024 * 1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::ExtensionMismatch { .. })));
    }

    #[tokio::test]
    async fn test_size_ceiling_is_inclusive() {
        let dir = tempdir().unwrap();
        let png = png_bytes();
        let size = png.len() as u64;
        let path = spool(dir.path(), &png);
        let file = UploadedFile::new(path, "edge.png", "image/png");

        assert!(validator(size).validate(&file).await.is_ok());

        let result = validator(size - 1).validate(&file).await;
        assert!(matches!(
            result,
            Err(UploadError::TooLarge { size: s, max }) if s == size && max == size - 1
        ));
    }

    #[tokio::test]
    async fn test_text_renamed_to_png() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), b"hello, I am plain text\n");
        let file = UploadedFile::new(path, "photo.png", "image/png");
        let result = validator(1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::InvalidImageContent(_))));
    }

    #[tokio::test]
    async fn test_content_type_disagrees_with_extension() {
        // A real GIF declared and named as a PNG.
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), &gif_bytes());
        let file = UploadedFile::new(path, "photo.png", "image/png");
        let result = validator(1024 * 1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::InvalidImageContent(_))));
    }

    #[tokio::test]
    async fn test_sniffed_type_must_be_allowed() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), &gif_bytes());
        let file = UploadedFile::new(path, "anim.gif", "image/gif");

        let list = AllowList::from_mime_types(&["image/gif"]).unwrap();
        assert!(UploadValidator::new(list, 1024 * 1024)
            .validate(&file)
            .await
            .is_ok());

        // Declared PNG, named .png, but the bytes are a GIF which is not allowed here.
        let path = spool(dir.path(), &gif_bytes());
        let file = UploadedFile::new(path, "anim.png", "image/png");
        let list = AllowList::from_mime_types(&["image/png"]).unwrap();
        let result = UploadValidator::new(list, 1024 * 1024).validate(&file).await;
        assert!(matches!(result, Err(UploadError::InvalidImageContent(_))));
    }

    #[tokio::test]
    async fn test_declared_type_with_parameters() {
        let dir = tempdir().unwrap();
        let path = spool(dir.path(), &png_bytes());
        let file = UploadedFile::new(path, "a.png", "image/PNG; q=1");
        assert!(validator(1024 * 1024).validate(&file).await.is_ok());
    }
}
