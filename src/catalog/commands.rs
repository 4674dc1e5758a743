use tauri::State;

use crate::{
    catalog::{CatalogView, CompareOutcome, DesignId, FilterOptions},
    compare::ComparisonSheet,
    filters::{FilterKey, SortOrder},
    provider::CatalogSource,
    settings::CatalogSettings,
    AppState,
};

#[tauri::command]
pub fn get_catalog_view(state: State<'_, AppState>) -> Result<CatalogView, String> {
    Ok(state.catalog.view())
}

#[tauri::command]
pub fn get_filter_options(state: State<'_, AppState>) -> Result<FilterOptions, String> {
    state
        .catalog
        .filter_options()
        .ok_or_else(|| "catalog not loaded".to_string())
}

#[tauri::command]
pub fn toggle_filter(
    state: State<'_, AppState>,
    key: FilterKey,
    value: String,
) -> Result<CatalogView, String> {
    Ok(state.catalog.toggle_filter(key, value))
}

#[tauri::command]
pub fn clear_filters(state: State<'_, AppState>) -> Result<CatalogView, String> {
    Ok(state.catalog.clear_filters())
}

#[tauri::command]
pub fn set_sort_order(state: State<'_, AppState>, order: SortOrder) -> Result<CatalogView, String> {
    Ok(state.catalog.set_sort_order(order))
}

#[tauri::command]
pub fn toggle_compare(
    state: State<'_, AppState>,
    design_id: DesignId,
) -> Result<CompareOutcome, String> {
    state
        .catalog
        .toggle_compare(design_id)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn remove_compare(
    state: State<'_, AppState>,
    design_id: DesignId,
) -> Result<CatalogView, String> {
    Ok(state.catalog.remove_compare(design_id))
}

#[tauri::command]
pub fn clear_compare(state: State<'_, AppState>) -> Result<CatalogView, String> {
    Ok(state.catalog.clear_compare())
}

#[tauri::command]
pub fn get_comparison_sheet(state: State<'_, AppState>) -> Result<ComparisonSheet, String> {
    Ok(state.catalog.comparison_sheet())
}

#[tauri::command]
pub async fn reload_catalog(state: State<'_, AppState>) -> Result<CatalogView, String> {
    let settings = state.settings.effective_catalog();
    let source = CatalogSource::from_settings(&settings).map_err(|e| e.to_string())?;
    state
        .catalog
        .load(&source, settings.use_bundled_fallback)
        .await
        .map_err(|e| format!("{e:#}"))
}

#[tauri::command]
pub fn get_catalog_settings(state: State<'_, AppState>) -> Result<CatalogSettings, String> {
    Ok(state.settings.catalog())
}

#[tauri::command]
pub fn set_catalog_settings(
    state: State<'_, AppState>,
    settings: CatalogSettings,
) -> Result<(), String> {
    state
        .settings
        .update_catalog(settings)
        .map_err(|e| e.to_string())
}
