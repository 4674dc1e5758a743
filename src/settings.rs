use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::filters::SortOrder;

pub const API_URL_ENV: &str = "HOUSEDESIGNS_API_URL";
pub const PAGE_SLUG_ENV: &str = "HOUSEDESIGNS_PAGE_SLUG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    pub api_base_url: String,
    pub page_slug: String,
    pub default_sort: SortOrder,
    pub use_bundled_fallback: bool,
    pub request_timeout_secs: u64,
    /// Load this page JSON instead of calling the CMS.
    pub catalog_file: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/v2".into(),
            page_slug: "home-design".into(),
            default_sort: SortOrder::Catalog,
            use_bundled_fallback: true,
            request_timeout_secs: 10,
            catalog_file: None,
        }
    }
}

impl CatalogSettings {
    /// Environment values replace the stored ones for this run only.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(slug) = lookup(PAGE_SLUG_ENV).filter(|v| !v.trim().is_empty()) {
            self.page_slug = slug;
        }
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    catalog: CatalogSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stored settings, without environment overrides.
    pub fn catalog(&self) -> CatalogSettings {
        self.read().catalog.clone()
    }

    /// Settings in effect for this process.
    pub fn effective_catalog(&self) -> CatalogSettings {
        self.catalog().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn update_catalog(&self, settings: CatalogSettings) -> Result<()> {
        let mut guard = self.write();
        guard.catalog = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
