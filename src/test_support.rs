//! Fixtures shared by unit and integration tests.

use std::sync::Mutex;

use serde_json::Value;

use crate::catalog::events::EventSink;
use crate::catalog::models::{HouseBadges, HouseDesign, HousePricing, HouseSpecs};

pub fn design(
    id: u64,
    storeys: &str,
    bedrooms: u32,
    bathrooms: &str,
    base_price: Option<&str>,
) -> HouseDesign {
    HouseDesign {
        id,
        name: format!("Design {id}"),
        slug: format!("design-{id}"),
        description: String::new(),
        image: None,
        specs: HouseSpecs {
            storeys: storeys.to_string(),
            storeys_label: String::new(),
            bedrooms,
            bathrooms: bathrooms.to_string(),
            garage_spaces: 2,
            block_width: "12.5m".to_string(),
        },
        pricing: HousePricing {
            base_price: base_price.map(str::to_string),
            display: String::new(),
            note: String::new(),
        },
        category: None,
        location: None,
        badges: HouseBadges::default(),
        virtual_tour_url: None,
        tags: Vec::new(),
    }
}

/// Three designs: two single storey (one cheaper, one with 1.5 baths) and
/// an unpriced double storey.
pub fn scenario_catalog() -> Vec<HouseDesign> {
    vec![
        design(1, "1", 3, "2", Some("300000")),
        design(2, "2", 4, "2.5", None),
        design(3, "1", 3, "1.5", Some("250000")),
    ]
}

pub fn ids(designs: &[&HouseDesign]) -> Vec<u64> {
    designs.iter().map(|d| d.id).collect()
}

/// Keeps every emitted event in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn named(&self, event: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|(name, _)| name == event)
            .map(|(_, payload)| payload)
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit_value(&self, event: &str, payload: Value) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((event.to_string(), payload));
    }
}
