//! Loads the catalog snapshot the engine works on.
//!
//! Sources: the CMS pages API, a page JSON on disk, or the catalog bundled
//! into the binary. The bundled catalog doubles as the fallback when the
//! configured source fails.

pub mod cms;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use crate::catalog::snapshot::{CatalogPage, CatalogSnapshot, SnapshotSource};
use crate::settings::CatalogSettings;

pub use cms::CmsClient;

const BUNDLED_CATALOG: &str = include_str!("../../resources/default_catalog.json");

#[derive(Clone)]
pub enum CatalogSource {
    Cms(CmsClient),
    File(PathBuf),
    Bundled,
}

impl CatalogSource {
    /// A configured catalog file wins over the CMS.
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self> {
        if let Some(path) = &settings.catalog_file {
            return Ok(CatalogSource::File(path.clone()));
        }
        let client = CmsClient::new(
            &settings.api_base_url,
            &settings.page_slug,
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        Ok(CatalogSource::Cms(client))
    }

    pub async fn load(&self) -> Result<CatalogSnapshot> {
        match self {
            CatalogSource::Cms(client) => {
                let page = client.fetch_page().await?;
                CatalogSnapshot::from_page(page, SnapshotSource::Cms)
            }
            CatalogSource::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
                let page = parse_page_document(&contents)
                    .with_context(|| format!("Invalid catalog in {}", path.display()))?;
                CatalogSnapshot::from_page(page, SnapshotSource::File)
            }
            CatalogSource::Bundled => bundled_snapshot(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Cms(client) => format!("CMS {}", client.describe()),
            CatalogSource::File(path) => format!("file {}", path.display()),
            CatalogSource::Bundled => "bundled catalog".to_string(),
        }
    }
}

pub fn bundled_snapshot() -> Result<CatalogSnapshot> {
    let page = parse_page_document(BUNDLED_CATALOG).context("bundled catalog is invalid")?;
    CatalogSnapshot::from_page(page, SnapshotSource::Bundled)
}

/// Accepts either a bare page object or a pages API listing.
pub fn parse_page_document(contents: &str) -> Result<CatalogPage> {
    let value: Value = serde_json::from_str(contents)?;
    if value.get("items").is_some() {
        return cms::parse_pages_response(contents);
    }
    Ok(serde_json::from_value(value)?)
}

pub async fn load_with_fallback(
    source: &CatalogSource,
    use_fallback: bool,
) -> Result<CatalogSnapshot> {
    info!("Loading catalog from {}", source.describe());
    match source.load().await {
        Ok(snapshot) => {
            info!("Loaded {} house designs", snapshot.len());
            Ok(snapshot)
        }
        Err(err) if use_fallback && !matches!(source, CatalogSource::Bundled) => {
            warn!(
                "Failed to load catalog from {}: {err:#}; using bundled catalog",
                source.describe()
            );
            bundled_snapshot()
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("housedesigns-{}-{name}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn bundled_catalog_parses() {
        let snapshot = bundled_snapshot().unwrap();
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.source, SnapshotSource::Bundled);
        // The fallback must exercise the price-on-application path.
        assert!(snapshot.designs.iter().any(|d| d.base_price().is_none()));
    }

    #[tokio::test]
    async fn file_source_reads_bare_page_and_listing() {
        let bare = temp_path("bare.json");
        std::fs::write(
            &bare,
            r#"{"id":1,"title":"Designs","house_designs_data":[
                {"id":4,"name":"Kestrel","specs":{"storeys":"2","bedrooms":4,"bathrooms":"2.5"},"pricing":{"base_price":null}}
            ]}"#,
        )
        .unwrap();
        let snapshot = CatalogSource::File(bare.clone()).load().await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::File);
        assert_eq!(snapshot.designs[0].name, "Kestrel");

        let listing = temp_path("listing.json");
        std::fs::write(&listing, r#"{"items":[{"id":2,"house_designs_data":[]}]}"#).unwrap();
        let snapshot = CatalogSource::File(listing.clone()).load().await.unwrap();
        assert_eq!(snapshot.page.id, 2);
        assert!(snapshot.is_empty());

        let _ = std::fs::remove_file(bare);
        let _ = std::fs::remove_file(listing);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_bundled_catalog() {
        let source = CatalogSource::File(temp_path("missing.json"));

        let err = load_with_fallback(&source, false).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read catalog"));

        let snapshot = load_with_fallback(&source, true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Bundled);
    }

    #[test]
    fn settings_prefer_catalog_file() {
        let settings = CatalogSettings {
            catalog_file: Some(PathBuf::from("/tmp/catalog.json")),
            ..CatalogSettings::default()
        };
        assert!(matches!(
            CatalogSource::from_settings(&settings).unwrap(),
            CatalogSource::File(_)
        ));

        let source = CatalogSource::from_settings(&CatalogSettings::default()).unwrap();
        assert!(source.describe().starts_with("CMS http://127.0.0.1:8000/api/v2"));
    }
}
