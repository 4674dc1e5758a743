use std::collections::HashSet;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{DesignId, FilterOptions, HouseDesign};

/// The house designs index page as the CMS pages API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro_title: String,
    #[serde(default)]
    pub intro_text: String,
    #[serde(default)]
    pub designs_per_page: Option<u32>,
    #[serde(default)]
    pub house_designs_data: Vec<HouseDesign>,
    #[serde(default)]
    pub filter_options: FilterOptions,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub id: u64,
    pub title: String,
    pub intro_title: String,
    pub intro_text: String,
    pub designs_per_page: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotSource {
    Cms,
    File,
    Bundled,
}

/// Immutable catalog for one browse session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub page: PageMeta,
    pub designs: Vec<HouseDesign>,
    pub filter_options: FilterOptions,
    pub source: SnapshotSource,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn from_page(page: CatalogPage, source: SnapshotSource) -> Result<Self> {
        ensure_unique_ids(&page.house_designs_data)?;

        Ok(Self {
            page: PageMeta {
                id: page.id,
                title: page.title,
                intro_title: page.intro_title,
                intro_text: page.intro_text,
                designs_per_page: page.designs_per_page,
            },
            designs: page.house_designs_data,
            filter_options: page.filter_options,
            source,
            loaded_at: Utc::now(),
        })
    }

    pub fn design(&self, id: DesignId) -> Option<&HouseDesign> {
        self.designs.iter().find(|design| design.id == id)
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }
}

fn ensure_unique_ids(designs: &[HouseDesign]) -> Result<()> {
    let mut seen = HashSet::with_capacity(designs.len());
    for design in designs {
        if !seen.insert(design.id) {
            bail!("duplicate house design id {} ('{}')", design.id, design.name);
        }
    }
    Ok(())
}
