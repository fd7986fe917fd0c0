//! Configuration module
//!
//! Settings are read from the process environment (optionally seeded from a
//! `.env` file) and checked by `Config::validate` before anything is wired up.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    extensions_for, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_RANDOM_SUFFIX_BYTES,
    DEFAULT_SLUG_MAX_LENGTH, IMAGE_TYPE_EXTENSIONS, MIN_RANDOM_SUFFIX_BYTES,
};

/// Upload ingestion settings
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Root directory every upload area lives under
    pub storage_root: PathBuf,
    /// Public URL prefix the storage root is served from
    pub public_base_url: String,
    pub max_file_size_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub random_suffix_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("public/storage"),
            public_base_url: "/storage".to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_content_types: IMAGE_TYPE_EXTENSIONS
                .iter()
                .map(|(mime, _)| mime.to_string())
                .collect(),
            random_suffix_bytes: DEFAULT_RANDOM_SUFFIX_BYTES,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub database_url: Option<String>,
    pub slug_max_length: usize,
    pub upload: UploadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database_url: None,
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
            upload: UploadConfig::default(),
        }
    }
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        let max_file_size_mb = number_var(
            "UPLOAD_MAX_FILE_SIZE_MB",
            env::var("UPLOAD_MAX_FILE_SIZE_MB").ok(),
            DEFAULT_MAX_FILE_SIZE_MB,
        )?;

        let allowed_content_types = match env::var("UPLOAD_ALLOWED_CONTENT_TYPES") {
            Ok(raw) => parse_list(&raw),
            Err(_) => defaults.upload.allowed_content_types,
        };

        let random_suffix_bytes = number_var(
            "UPLOAD_RANDOM_BYTES",
            env::var("UPLOAD_RANDOM_BYTES").ok(),
            DEFAULT_RANDOM_SUFFIX_BYTES,
        )?;

        let slug_max_length = number_var(
            "SLUG_MAX_LENGTH",
            env::var("SLUG_MAX_LENGTH").ok(),
            DEFAULT_SLUG_MAX_LENGTH,
        )?;

        let upload = UploadConfig {
            storage_root: env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload.storage_root),
            public_base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or(defaults.upload.public_base_url),
            max_file_size_bytes: megabytes_to_bytes(max_file_size_mb)?,
            allowed_content_types,
            random_suffix_bytes,
        };

        Ok(Config {
            environment,
            database_url,
            slug_max_length,
            upload,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgresql://") || url.starts_with("postgres://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.upload.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_MAX_FILE_SIZE_MB must be greater than zero"
            ));
        }

        if self.upload.random_suffix_bytes < MIN_RANDOM_SUFFIX_BYTES {
            return Err(anyhow::anyhow!(
                "UPLOAD_RANDOM_BYTES must be at least {}",
                MIN_RANDOM_SUFFIX_BYTES
            ));
        }

        if self.upload.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_ALLOWED_CONTENT_TYPES must list at least one image type"
            ));
        }

        if let Some(unknown) = self
            .upload
            .allowed_content_types
            .iter()
            .find(|ct| extensions_for(ct).is_none())
        {
            return Err(anyhow::anyhow!(
                "UPLOAD_ALLOWED_CONTENT_TYPES contains unsupported type '{}'",
                unknown
            ));
        }

        if self.slug_max_length == 0 {
            return Err(anyhow::anyhow!("SLUG_MAX_LENGTH must be greater than zero"));
        }

        Ok(())
    }
}

/// Parse a numeric variable, using `default` when it is unset.
fn number_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, anyhow::Error> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a whole number, got '{}'", name, raw)),
    }
}

fn megabytes_to_bytes(megabytes: u64) -> Result<u64, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("UPLOAD_MAX_FILE_SIZE_MB is too large: {}", megabytes))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
