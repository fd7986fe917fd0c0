//! Shared constants.

/// Image MIME types an upload may be stored as, each with the file extensions
/// registered for it. Only formats the content sniffer can decode are listed.
pub const IMAGE_TYPE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/webp", &["webp"]),
    ("image/gif", &["gif"]),
    ("image/x-icon", &["ico"]),
    ("image/bmp", &["bmp"]),
    ("image/tiff", &["tiff", "tif"]),
];

/// Upload size ceiling in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

/// Random bytes appended to generated filenames (hex encoded, so twice as many chars).
pub const DEFAULT_RANDOM_SUFFIX_BYTES: usize = 8;

/// Lower bound for `UPLOAD_RANDOM_BYTES`.
pub const MIN_RANDOM_SUFFIX_BYTES: usize = 4;

/// Longest base slug kept before numeric suffixes are appended.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 200;

/// Extensions registered for `mime_type`, if it is a known image type.
pub fn extensions_for(mime_type: &str) -> Option<&'static [&'static str]> {
    IMAGE_TYPE_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, exts)| *exts)
}
