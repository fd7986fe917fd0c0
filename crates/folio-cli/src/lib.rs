use std::path::Path;

use folio_processing::AllowList;

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// MIME type the allow-list registers for the file's extension.
pub fn infer_mime_type(allow_list: &AllowList, path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    allow_list
        .mime_types()
        .find(|mime| {
            allow_list
                .extensions_for(mime)
                .is_some_and(|exts| exts.iter().any(|e| *e == extension))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_mime_type_from_extension() {
        let list = AllowList::default();
        assert_eq!(
            infer_mime_type(&list, Path::new("photos/Cover.JPG")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            infer_mime_type(&list, Path::new("scan.tif")).as_deref(),
            Some("image/tiff")
        );
    }

    #[test]
    fn infer_mime_type_unknown() {
        let list = AllowList::default();
        assert_eq!(infer_mime_type(&list, Path::new("notes.txt")), None);
        assert_eq!(infer_mime_type(&list, Path::new("README")), None);

        let png_only = AllowList::from_mime_types(&["image/png"]).unwrap();
        assert_eq!(infer_mime_type(&png_only, Path::new("a.jpg")), None);
    }
}
