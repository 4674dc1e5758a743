//! Catalog data models.
//!
//! The CMS delivers snake_case JSON (`garage_spaces`, `base_price`); the
//! webview consumes camelCase. Every type here deserializes the former and
//! serializes the latter.

use serde::{Deserialize, Serialize};

pub type DesignId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct HouseDesign {
    pub id: DesignId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<DesignImage>,
    pub specs: HouseSpecs,
    pub pricing: HousePricing,
    #[serde(default)]
    pub category: Option<HouseCategory>,
    #[serde(default)]
    pub location: Option<HouseLocation>,
    #[serde(default)]
    pub badges: HouseBadges,
    #[serde(default)]
    pub virtual_tour_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl HouseDesign {
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.slug.as_str())
    }

    /// Base price as entered in the CMS, `None` when the design is
    /// "price on application". Blank strings count as absent.
    pub fn base_price(&self) -> Option<&str> {
        self.pricing
            .base_price
            .as_deref()
            .filter(|price| !price.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct HouseSpecs {
    /// Categorical code: "1", "2" or "3".
    pub storeys: String,
    #[serde(default)]
    pub storeys_label: String,
    pub bedrooms: u32,
    /// Decimal string so half-baths survive ("2.5").
    pub bathrooms: String,
    #[serde(default)]
    pub garage_spaces: u32,
    #[serde(default)]
    pub block_width: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct HousePricing {
    #[serde(default)]
    pub base_price: Option<String>,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseLocation {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct HouseBadges {
    #[serde(default)]
    pub on_display: bool,
    #[serde(default)]
    pub virtual_tour: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Enumerated choices per filter dimension, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct FilterOptions {
    #[serde(default = "default_storeys")]
    pub storeys: Vec<FilterOption>,
    #[serde(default = "default_bedrooms")]
    pub bedrooms: Vec<FilterOption>,
    #[serde(default = "default_bathrooms")]
    pub bathrooms: Vec<FilterOption>,
    #[serde(default)]
    pub categories: Vec<FilterOption>,
    #[serde(default = "default_price_ranges")]
    pub price_ranges: Vec<FilterOption>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            storeys: default_storeys(),
            bedrooms: default_bedrooms(),
            bathrooms: default_bathrooms(),
            categories: Vec::new(),
            price_ranges: default_price_ranges(),
        }
    }
}

fn default_storeys() -> Vec<FilterOption> {
    vec![
        FilterOption::new("Single Storey", "1"),
        FilterOption::new("Double Storey", "2"),
        FilterOption::new("Three Storey", "3"),
    ]
}

fn default_bedrooms() -> Vec<FilterOption> {
    (1..=6)
        .map(|count| FilterOption::new(count.to_string(), count.to_string()))
        .collect()
}

fn default_bathrooms() -> Vec<FilterOption> {
    vec![
        FilterOption::new("1", "1"),
        FilterOption::new("2", "2"),
        FilterOption::new("2.5", "2.5"),
        FilterOption::new("3", "3"),
        FilterOption::new("3+", "3"),
    ]
}

fn default_price_ranges() -> Vec<FilterOption> {
    vec![
        FilterOption::new("Under $300k", "300000"),
        FilterOption::new("Under $400k", "400000"),
        FilterOption::new("Under $500k", "500000"),
        FilterOption::new("Under $600k", "600000"),
        FilterOption::new("$600k+", "600001"),
    ]
}
