//! Import translation bundles into the database.
//!
//! Usage:
//!   cargo run --bin import-translations -- messages/             # Upsert every row
//!   cargo run --bin import-translations -- messages/ --dry-run   # Only report
//!
//! The directory holds `ru.json` (required) plus optional `kk.json` and
//! `en.json`, each shaped `{ "Namespace": { "key": "text" } }`.
//!
//! Required environment variables (not needed with --dry-run):
//! - DATABASE_URL
//!
//! A running server keeps serving cached trees until its freshness window
//! passes; call `POST /api/admin/revalidate` to pick up the import at once.

use anyhow::{bail, Context, Result};
use federation_portal::db::Database;
use federation_portal::i18n::{entries_from_bundles, TranslationValidator};
use federation_portal::store::ContentStore;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Read `<dir>/<code>.json`, `None` if the file does not exist.
fn load_bundle(dir: &Path, code: &str) -> Result<Option<Value>> {
    let path = dir.join(format!("{}.json", code));
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?;
    let bundle = serde_json::from_str(&contents)
        .context(format!("Failed to parse {}", path.display()))?;
    Ok(Some(bundle))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("import_translations=info".parse()?)
                .add_directive("federation_portal=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|arg| arg == "--dry-run");
    let Some(dir) = args.iter().skip(1).find(|arg| !arg.starts_with("--")) else {
        bail!("Usage: import-translations <messages-dir> [--dry-run]");
    };
    let dir = Path::new(dir);

    let Some(ru) = load_bundle(dir, "ru")? else {
        bail!("{} has no ru.json", dir.display());
    };
    let kk = load_bundle(dir, "kk")?;
    let en = load_bundle(dir, "en")?;

    let outcome = entries_from_bundles(&ru, kk.as_ref(), en.as_ref());
    info!(
        "Parsed {} entries ({} skipped) from {}",
        outcome.entries.len(),
        outcome.skipped.len(),
        dir.display()
    );

    let (valid, invalid): (Vec<_>, Vec<_>) = outcome
        .entries
        .into_iter()
        .map(|entry| (TranslationValidator::validate(&entry), entry))
        .partition(|(report, _)| !report.has_errors());

    for (report, entry) in &invalid {
        warn!("Rejected {}.{}: {:?}", entry.namespace, entry.key, report.errors);
    }

    if dry_run {
        info!("Dry run: {} entries would be imported", valid.len());
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let db = Database::new(&database_url, 2).await?;

    for (report, entry) in &valid {
        if report.has_warnings() {
            warn!("{}.{}: {:?}", entry.namespace, entry.key, report.warnings);
        }
        db.upsert_translation(entry)
            .await
            .context(format!("Failed to import {}.{}", entry.namespace, entry.key))?;
    }

    info!("✓ Imported {} translations", valid.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_bundle_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_bundle(dir.path(), "kk").unwrap().is_none());
    }

    #[test]
    fn test_load_bundle_parses_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ru.json"), r#"{"Header":{"news":"Новости"}}"#).unwrap();

        let bundle = load_bundle(dir.path(), "ru").unwrap().unwrap();
        assert_eq!(bundle["Header"]["news"], "Новости");
    }

    #[test]
    fn test_load_bundle_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.json"), "{ not json").unwrap();

        let err = load_bundle(dir.path(), "en").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
