//! Seed the gift catalog from a YAML file.
//!
//! Reads gift entries (name, optional image and shop URLs) and inserts them
//! into the `gift` table. Existing names are left untouched, so the command
//! is safe to re-run; `--replace` first deletes unreserved gifts missing
//! from the file. Reserved gifts are never removed - a guest already
//! claimed them.

use std::path::Path;

use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};

use super::migrate::database_url;

/// Catalog file shape.
#[derive(Debug, Deserialize)]
pub struct GiftCatalog {
    pub gifts: Vec<GiftEntry>,
}

/// A single catalog entry.
#[derive(Debug, Deserialize)]
pub struct GiftEntry {
    pub name: String,
    #[serde(default)]
    pub url_image: Option<String>,
    #[serde(default)]
    pub url_shop: Option<String>,
}

/// Validate a parsed catalog, returning human-readable problems.
fn validate_catalog(catalog: &GiftCatalog) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    if catalog.gifts.is_empty() {
        errors.push("catalog contains no gifts".to_string());
    }

    for entry in &catalog.gifts {
        let name = entry.name.trim();
        if name.is_empty() {
            errors.push("gift with empty name".to_string());
        } else if !seen.insert(name.to_owned()) {
            errors.push(format!("duplicate gift name: {name}"));
        }
    }

    errors
}

/// Load the gift catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `replace` - If true, delete unreserved gifts that are not in the file
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, or database operations fail.
pub async fn gifts(file_path: &str, replace: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading gift catalog from file");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: GiftCatalog = serde_yaml::from_str(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        for error in &errors {
            warn!(%error, "Catalog validation problem");
        }
        return Err(format!("catalog invalid: {}", errors.join("; ")).into());
    }

    info!(gifts = catalog.gifts.len(), "Parsed catalog");

    let pool = PgPool::connect(database_url.expose_secret()).await?;

    if replace {
        let names: Vec<String> = catalog
            .gifts
            .iter()
            .map(|g| g.name.trim().to_owned())
            .collect();
        let removed = sqlx::query(
            "DELETE FROM gift WHERE selected = false AND name <> ALL($1)",
        )
        .bind(&names)
        .execute(&pool)
        .await?
        .rows_affected();
        if removed > 0 {
            info!(removed, "Removed unreserved gifts missing from the file");
        }
    }

    let mut inserted = 0_u64;
    for entry in &catalog.gifts {
        let result = sqlx::query(
            r"
            INSERT INTO gift (name, url_image, url_shop)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(entry.name.trim())
        .bind(entry.url_image.as_deref())
        .bind(entry.url_shop.as_deref())
        .execute(&pool)
        .await?;
        inserted += result.rows_affected();
    }

    info!(
        inserted,
        skipped = catalog.gifts.len() as u64 - inserted,
        "Gift catalog seeded"
    );
    Ok(())
}
