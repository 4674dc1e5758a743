use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{anyhow, Result};
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    compare::{comparison_sheet, CompareError, CompareToggle, ComparisonSet, ComparisonSheet},
    filters::{filter_designs, sort_designs, FilterKey, FilterSelection, SortOrder},
    provider::{load_with_fallback, CatalogSource},
};

use super::{
    events::{self, CompareLimitReachedEvent, EventSink, LoadFailedEvent},
    models::{DesignId, FilterOptions, HouseDesign},
    snapshot::CatalogSnapshot,
    view::{CatalogView, CompareSummary, LoadStatus},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareOutcome {
    pub toggle: CompareToggle,
    pub view: CatalogView,
}

#[derive(Clone, PartialEq, Eq)]
struct ViewKey {
    generation: u64,
    selection_hash: u64,
    selection: FilterSelection,
    sort: SortOrder,
}

struct ViewCache {
    key: ViewKey,
    designs: Vec<HouseDesign>,
}

struct ControllerState {
    session_id: String,
    status: LoadStatus,
    snapshot: Option<Arc<CatalogSnapshot>>,
    generation: u64,
    selection: FilterSelection,
    compare: ComparisonSet,
    sort: SortOrder,
    cache: Option<ViewCache>,
    computations: u64,
}

impl ControllerState {
    fn new(sort: SortOrder) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            status: LoadStatus::Loading,
            snapshot: None,
            generation: 0,
            selection: FilterSelection::new(),
            compare: ComparisonSet::new(),
            sort,
            cache: None,
            computations: 0,
        }
    }

    fn snapshot(&self) -> Result<&Arc<CatalogSnapshot>> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| anyhow!("catalog not loaded"))
    }

    /// Filtered and sorted designs, recomputed only when the selection,
    /// sort order or snapshot changed since the last call.
    fn visible_designs(&mut self) -> Vec<HouseDesign> {
        let Some(snapshot) = self.snapshot.clone() else {
            return Vec::new();
        };

        let key = ViewKey {
            generation: self.generation,
            selection_hash: hash_selection(&self.selection),
            selection: self.selection.clone(),
            sort: self.sort,
        };

        if let Some(cache) = &self.cache {
            if cache.key == key {
                return cache.designs.clone();
            }
        }

        let mut visible = filter_designs(&snapshot.designs, &self.selection);
        sort_designs(&mut visible, self.sort);
        let designs: Vec<HouseDesign> = visible.into_iter().cloned().collect();

        self.computations += 1;
        self.cache = Some(ViewCache {
            key,
            designs: designs.clone(),
        });
        designs
    }

    fn view(&mut self) -> CatalogView {
        let designs = self.visible_designs();
        CatalogView {
            session_id: self.session_id.clone(),
            status: self.status.clone(),
            source: self.snapshot.as_ref().map(|snapshot| snapshot.source),
            results_count: designs.len(),
            total_count: self.snapshot.as_ref().map_or(0, |snapshot| snapshot.len()),
            designs,
            active_filters: self.selection.clone(),
            has_active_filters: !self.selection.is_empty(),
            sort_order: self.sort,
            compare: CompareSummary::from(&self.compare),
        }
    }
}

fn hash_selection(selection: &FilterSelection) -> u64 {
    let mut hasher = DefaultHasher::new();
    selection.hash(&mut hasher);
    hasher.finish()
}

/// Owns the catalog snapshot and the per-session filter and comparison
/// state. Cloning shares the same session.
#[derive(Clone)]
pub struct CatalogController {
    state: Arc<Mutex<ControllerState>>,
    events: Arc<dyn EventSink>,
}

impl CatalogController {
    pub fn new(events: Arc<dyn EventSink>, default_sort: SortOrder) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::new(default_sort))),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the catalog and starts a fresh browse session: filters and
    /// the comparison set are reset.
    pub fn install(&self, snapshot: CatalogSnapshot) -> CatalogView {
        let view = {
            let mut state = self.lock();
            info!(
                "Installing catalog with {} designs from {:?}",
                snapshot.len(),
                snapshot.source
            );
            state.session_id = Uuid::new_v4().to_string();
            state.generation = state.generation.wrapping_add(1);
            state.snapshot = Some(Arc::new(snapshot));
            state.status = LoadStatus::Ready;
            state.selection.clear();
            state.compare.clear();
            state.cache = None;
            state.view()
        };
        self.emit_view(&view);
        view
    }

    pub async fn load(&self, source: &CatalogSource, use_fallback: bool) -> Result<CatalogView> {
        {
            let mut state = self.lock();
            state.status = LoadStatus::Loading;
        }

        match load_with_fallback(source, use_fallback).await {
            Ok(snapshot) => Ok(self.install(snapshot)),
            Err(err) => {
                let message = format!("{err:#}");
                self.mark_failed(message.clone());
                Err(err.context("Error loading House Designs"))
            }
        }
    }

    /// A failed reload leaves an installed snapshot and its session as they
    /// were. Only a first load that fails puts the view into `Failed`.
    fn mark_failed(&self, message: String) {
        let session_id = {
            let mut state = self.lock();
            state.status = if state.snapshot.is_some() {
                LoadStatus::Ready
            } else {
                LoadStatus::Failed {
                    message: message.clone(),
                }
            };
            state.session_id.clone()
        };
        warn!("Catalog load failed: {message}");
        events::emit(
            self.events.as_ref(),
            events::LOAD_FAILED,
            &LoadFailedEvent {
                session_id,
                message,
            },
        );
    }

    pub fn view(&self) -> CatalogView {
        self.lock().view()
    }

    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.lock().snapshot.clone()
    }

    pub fn filter_options(&self) -> Option<FilterOptions> {
        self.lock()
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.filter_options.clone())
    }

    pub fn selection(&self) -> FilterSelection {
        self.lock().selection.clone()
    }

    pub fn toggle_filter(&self, key: FilterKey, value: impl Into<String>) -> CatalogView {
        self.mutate(|state| {
            state.selection.toggle(key, value);
        })
    }

    pub fn clear_filters(&self) -> CatalogView {
        self.mutate(|state| state.selection.clear())
    }

    pub fn set_sort_order(&self, order: SortOrder) -> CatalogView {
        self.mutate(|state| state.sort = order)
    }

    pub fn toggle_compare(&self, design_id: DesignId) -> Result<CompareOutcome> {
        let (toggle, view, rejected) = {
            let mut state = self.lock();
            let design = state
                .snapshot()?
                .design(design_id)
                .cloned()
                .ok_or_else(|| anyhow!("unknown house design {design_id}"))?;

            let toggle = state.compare.toggle(&design);
            let rejected = (toggle == CompareToggle::Rejected).then(|| {
                let notice = CompareError::CapacityReached {
                    capacity: crate::compare::COMPARE_CAPACITY,
                };
                CompareLimitReachedEvent {
                    session_id: state.session_id.clone(),
                    capacity: crate::compare::COMPARE_CAPACITY,
                    design_id,
                    design_name: design.name.clone(),
                    message: notice.to_string(),
                }
            });
            (toggle, state.view(), rejected)
        };

        match rejected {
            Some(notice) => {
                info!("Comparison full; rejected design {design_id}");
                events::emit(self.events.as_ref(), events::COMPARE_LIMIT_REACHED, &notice);
            }
            None => self.emit_view(&view),
        }

        Ok(CompareOutcome { toggle, view })
    }

    pub fn remove_compare(&self, design_id: DesignId) -> CatalogView {
        self.mutate(|state| {
            state.compare.remove(design_id);
        })
    }

    pub fn clear_compare(&self) -> CatalogView {
        self.mutate(|state| state.compare.clear())
    }

    pub fn is_comparing(&self, design_id: DesignId) -> bool {
        self.lock().compare.contains(design_id)
    }

    pub fn comparison_sheet(&self) -> ComparisonSheet {
        comparison_sheet(&self.lock().compare)
    }

    fn mutate(&self, apply: impl FnOnce(&mut ControllerState)) -> CatalogView {
        let view = {
            let mut state = self.lock();
            apply(&mut state);
            state.view()
        };
        self.emit_view(&view);
        view
    }

    fn emit_view(&self, view: &CatalogView) {
        events::emit(self.events.as_ref(), events::VIEW_CHANGED, view);
    }

    #[cfg(test)]
    fn computations(&self) -> u64 {
        self.lock().computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::snapshot::{CatalogPage, SnapshotSource};
    use crate::test_support::{design, scenario_catalog, RecordingSink};

    fn snapshot(designs: Vec<HouseDesign>) -> CatalogSnapshot {
        let page = CatalogPage {
            id: 1,
            title: "House Designs".into(),
            intro_title: String::new(),
            intro_text: String::new(),
            designs_per_page: None,
            house_designs_data: designs,
            filter_options: FilterOptions::default(),
        };
        CatalogSnapshot::from_page(page, SnapshotSource::File).unwrap()
    }

    fn controller() -> (CatalogController, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let controller = CatalogController::new(sink.clone(), SortOrder::Catalog);
        controller.install(snapshot(scenario_catalog()));
        (controller, sink)
    }

    #[test]
    fn view_before_load_is_empty_and_loading() {
        let controller = CatalogController::new(Arc::new(RecordingSink::new()), SortOrder::Catalog);
        let view = controller.view();
        assert_eq!(view.status, LoadStatus::Loading);
        assert!(view.designs.is_empty());
        assert_eq!(view.total_count, 0);
        assert!(controller.toggle_compare(1).is_err());
    }

    #[test]
    fn filter_toggles_drive_the_visible_set() {
        let (controller, _) = controller();

        let view = controller.toggle_filter(FilterKey::Storeys, "1");
        assert_eq!(view.design_ids(), vec![1, 3]);
        assert!(view.has_active_filters);

        let view = controller.toggle_filter(FilterKey::MaxPrice, "280000");
        assert_eq!(view.design_ids(), vec![3]);
        assert_eq!(view.results_count, 1);
        assert_eq!(view.total_count, 3);

        let view = controller.clear_filters();
        assert_eq!(view.design_ids(), vec![1, 2, 3]);
        assert!(!view.has_active_filters);
    }

    #[test]
    fn unchanged_inputs_reuse_the_cached_view() {
        let (controller, _) = controller();
        controller.view();
        let after_first = controller.computations();

        controller.view();
        controller.clear_compare();
        assert_eq!(controller.computations(), after_first);

        controller.toggle_filter(FilterKey::Storeys, "2");
        assert_eq!(controller.computations(), after_first + 1);

        // Back to an empty selection is a different key than the cached one.
        let view = controller.toggle_filter(FilterKey::Storeys, "2");
        assert_eq!(view.design_ids(), vec![1, 2, 3]);
        assert_eq!(controller.computations(), after_first + 2);
    }

    #[test]
    fn sort_order_applies_after_filtering() {
        let (controller, _) = controller();
        controller.toggle_filter(FilterKey::Storeys, "1");
        let view = controller.set_sort_order(SortOrder::PriceLowToHigh);
        assert_eq!(view.design_ids(), vec![3, 1]);
        assert_eq!(view.sort_order, SortOrder::PriceLowToHigh);
    }

    #[test]
    fn fourth_compare_is_rejected_with_a_notice() {
        let sink = Arc::new(RecordingSink::new());
        let controller = CatalogController::new(sink.clone(), SortOrder::Catalog);
        controller.install(snapshot(
            (1..=4).map(|id| design(id, "1", 3, "2", Some("300000"))).collect(),
        ));

        for id in 1..=3 {
            assert_eq!(controller.toggle_compare(id).unwrap().toggle, CompareToggle::Added);
        }
        let outcome = controller.toggle_compare(4).unwrap();
        assert_eq!(outcome.toggle, CompareToggle::Rejected);
        assert_eq!(outcome.view.compare.ids, vec![1, 2, 3]);
        assert!(!controller.is_comparing(4));

        let notices = sink.named(events::COMPARE_LIMIT_REACHED);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0]["capacity"], 3);
        assert_eq!(notices[0]["designId"], 4);
    }

    #[test]
    fn compare_unknown_design_is_an_error() {
        let (controller, _) = controller();
        let err = controller.toggle_compare(42).unwrap_err();
        assert!(err.to_string().contains("unknown house design 42"));
    }

    #[test]
    fn comparison_is_independent_of_filters() {
        let (controller, _) = controller();
        controller.toggle_compare(2).unwrap();
        let view = controller.toggle_filter(FilterKey::Storeys, "1");
        assert_eq!(view.design_ids(), vec![1, 3]);
        assert_eq!(view.compare.ids, vec![2]);
        assert!(controller.is_comparing(2));
    }

    #[test]
    fn empty_filter_value_leaves_the_view_unfiltered() {
        let (controller, _) = controller();
        let view = controller.toggle_filter(FilterKey::MaxPrice, "");
        assert_eq!(view.design_ids(), vec![1, 2, 3]);
        assert!(!view.has_active_filters);
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_installed_catalog() {
        let (controller, sink) = controller();
        controller.toggle_filter(FilterKey::Storeys, "1");
        controller.toggle_compare(1).unwrap();
        let session = controller.view().session_id;

        let missing = std::env::temp_dir()
            .join(format!("housedesigns-missing-{}.json", uuid::Uuid::new_v4()));
        assert!(controller
            .load(&CatalogSource::File(missing), false)
            .await
            .is_err());

        let view = controller.view();
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.session_id, session);
        assert_eq!(view.design_ids(), vec![1, 3]);
        assert_eq!(view.compare.ids, vec![1]);

        let failures = sink.named(events::LOAD_FAILED);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0]["sessionId"], session.as_str());
    }

    #[test]
    fn reinstall_resets_session_state() {
        let (controller, _) = controller();
        let first_session = controller.view().session_id;
        controller.toggle_filter(FilterKey::Bedrooms, "3");
        controller.toggle_compare(1).unwrap();

        let view = controller.install(snapshot(scenario_catalog()));
        assert_ne!(view.session_id, first_session);
        assert!(view.active_filters.is_empty());
        assert_eq!(view.compare.count, 0);
        assert_eq!(view.design_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn mutations_emit_view_events() {
        let (controller, sink) = controller();
        controller.toggle_filter(FilterKey::Storeys, "2");
        controller.remove_compare(1);

        let views = sink.named(events::VIEW_CHANGED);
        // install + toggle + remove
        assert_eq!(views.len(), 3);
        assert_eq!(views[1]["activeFilters"]["storeys"], "2");
        assert_eq!(views[1]["resultsCount"], 1);
    }

    #[test]
    fn sheet_tracks_comparison() {
        let (controller, _) = controller();
        controller.toggle_compare(3).unwrap();
        controller.toggle_compare(1).unwrap();
        let sheet = controller.comparison_sheet();
        let ids: Vec<_> = sheet.columns.iter().map(|c| c.design_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
