//! Folio CLI: slug and upload tooling for the Folio back office.
//!
//! Reads the same environment as the service (STORAGE_ROOT, UPLOAD_*, SLUG_MAX_LENGTH).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_admin::SlugAllocator;
use folio_cli::{infer_mime_type, init_tracing};
use folio_core::{Config, UploadArea, UploadedFile};
use folio_db::TakenSlugs;
use folio_processing::UploadIngestor;
use folio_storage::LocalStorage;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "folio", about = "Folio back-office tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Allocate a slug for a title
    Slug {
        /// Title to slugify
        title: String,
        /// Slugs already in use, comma separated
        #[arg(long, value_delimiter = ',')]
        taken: Vec<String>,
    },
    /// Validate an image and store it in an upload area
    Ingest {
        /// Path to the image
        file: PathBuf,
        /// Upload area: posts, portfolio or shop
        #[arg(long, default_value = "posts")]
        area: UploadArea,
        /// Declared MIME type; inferred from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Delete a stored upload (missing files are fine)
    Remove {
        /// Stored filename
        filename: String,
        /// Upload area: posts, portfolio or shop
        #[arg(long, default_value = "posts")]
        area: UploadArea,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn ingestor(config: &Config) -> anyhow::Result<UploadIngestor> {
    let storage = LocalStorage::new(
        &config.upload.storage_root,
        config.upload.public_base_url.clone(),
    )
    .await
    .context("Failed to open storage root")?;

    UploadIngestor::from_config(&config.upload, Arc::new(storage))
        .context("Invalid upload configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    tracing::debug!(
        environment = %config.environment,
        storage_root = %config.upload.storage_root.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Slug { title, taken } => {
            let taken = TakenSlugs::new(
                taken
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );
            let slug = SlugAllocator::from_config(&config)
                .allocate(&taken, &title, None)
                .await?;
            print_json(&serde_json::json!({ "title": title, "slug": slug }))?;
        }
        Commands::Ingest { file, area, mime } => {
            let ingestor = ingestor(&config).await?;
            let mime = match mime {
                Some(mime) => mime,
                None => infer_mime_type(ingestor.validator().allow_list(), &file)
                    .with_context(|| {
                        format!(
                            "Cannot infer MIME type for {}; pass --mime",
                            file.display()
                        )
                    })?,
            };
            let original_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let asset = ingestor
                .ingest(&UploadedFile::new(file, original_name, mime), area)
                .await?;
            print_json(&asset)?;
        }
        Commands::Remove { filename, area } => {
            let ingestor = ingestor(&config).await?;
            ingestor.remove(area, Some(filename.as_str())).await?;
            print_json(&serde_json::json!({
                "success": true,
                "message": format!("{} removed from {}", filename, area)
            }))?;
        }
    }

    Ok(())
}
