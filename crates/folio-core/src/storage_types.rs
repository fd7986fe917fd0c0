use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

/// Directory an uploaded asset belongs to.
///
/// Defined in core because entities, configuration and the storage layer all
/// need to agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadArea {
    /// Blog post cover images
    Posts,
    /// Portfolio item images
    Portfolio,
    /// Product preview and detail pictures
    Shop,
}

impl UploadArea {
    /// Storage directory, relative to the storage root.
    pub fn directory(&self) -> &'static str {
        match self {
            UploadArea::Posts => "uploads",
            UploadArea::Portfolio => "uploads/portfolio",
            UploadArea::Shop => "shop_uploads",
        }
    }
}

impl FromStr for UploadArea {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posts" => Ok(UploadArea::Posts),
            "portfolio" => Ok(UploadArea::Portfolio),
            "shop" => Ok(UploadArea::Shop),
            _ => Err(anyhow::anyhow!("Invalid upload area: {}", s)),
        }
    }
}

impl Display for UploadArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadArea::Posts => write!(f, "posts"),
            UploadArea::Portfolio => write!(f, "portfolio"),
            UploadArea::Shop => write!(f, "shop"),
        }
    }
}

/// An untrusted file received with a request.
///
/// The HTTP layer spools multipart bodies to a temporary file; `path` points at
/// it. `original_name` and `mime_type` are whatever the client claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub original_name: String,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(
        path: impl Into<PathBuf>,
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            original_name: original_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Lowercased extension of the client-supplied filename, if any.
    pub fn declared_extension(&self) -> Option<String> {
        std::path::Path::new(&self.original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .filter(|e| !e.is_empty())
    }
}
