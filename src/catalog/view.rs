use serde::Serialize;

use crate::compare::{ComparisonSet, COMPARE_CAPACITY};
use crate::filters::{FilterSelection, SortOrder};

use super::models::{DesignId, HouseDesign};
use super::snapshot::SnapshotSource;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed { message: String },
}

/// Everything the webview needs to render the catalog page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub session_id: String,
    pub status: LoadStatus,
    pub source: Option<SnapshotSource>,
    pub designs: Vec<HouseDesign>,
    pub results_count: usize,
    pub total_count: usize,
    pub active_filters: FilterSelection,
    pub has_active_filters: bool,
    pub sort_order: SortOrder,
    pub compare: CompareSummary,
}

impl CatalogView {
    pub fn design_ids(&self) -> Vec<DesignId> {
        self.designs.iter().map(|design| design.id).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareSummary {
    pub designs: Vec<HouseDesign>,
    pub ids: Vec<DesignId>,
    pub count: usize,
    pub capacity: usize,
    pub can_compare: bool,
}

impl From<&ComparisonSet> for CompareSummary {
    fn from(set: &ComparisonSet) -> Self {
        Self {
            designs: set.as_slice().to_vec(),
            ids: set.ids(),
            count: set.len(),
            capacity: COMPARE_CAPACITY,
            can_compare: set.can_compare(),
        }
    }
}
