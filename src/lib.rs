pub mod catalog;
pub mod compare;
pub mod filters;
pub mod provider;
pub mod settings;

#[cfg(any(test, feature = "test-util"))]
pub mod test_support;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use log::{error, info};
    use tauri::{Manager, State};
    use tauri_plugin_opener::OpenerExt;

    use crate::{
        catalog::{
            commands::{
                clear_compare, clear_filters, get_catalog_settings, get_catalog_view,
                get_comparison_sheet, get_filter_options, reload_catalog, remove_compare,
                set_catalog_settings, set_sort_order, toggle_compare, toggle_filter,
            },
            CatalogController, DesignId,
        },
        provider::CatalogSource,
        settings::SettingsStore,
    };

    pub(crate) struct AppState {
        pub(crate) catalog: CatalogController,
        pub(crate) settings: SettingsStore,
    }

    #[tauri::command]
    fn open_virtual_tour(
        design_id: DesignId,
        state: State<AppState>,
        app_handle: tauri::AppHandle,
    ) -> Result<(), String> {
        let snapshot = state
            .catalog
            .snapshot()
            .ok_or_else(|| "catalog not loaded".to_string())?;
        let design = snapshot
            .design(design_id)
            .ok_or_else(|| format!("unknown house design {design_id}"))?;
        let url = design
            .virtual_tour_url
            .as_deref()
            .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
            .ok_or_else(|| format!("{} has no virtual tour", design.name))?;

        app_handle
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| e.to_string())
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        // Initialize logging (reads RUST_LOG env var)
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("House designs starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&app_data_dir)?;

                    let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;
                    let settings = settings_store.effective_catalog();
                    let source = CatalogSource::from_settings(&settings)?;

                    let catalog =
                        CatalogController::new(Arc::new(app.handle().clone()), settings.default_sort);

                    app.manage(AppState {
                        catalog: catalog.clone(),
                        settings: settings_store,
                    });

                    // The webview shows its loading state until the first view event.
                    tauri::async_runtime::spawn(async move {
                        match catalog.load(&source, settings.use_bundled_fallback).await {
                            Ok(view) => info!("Catalog ready with {} designs", view.total_count),
                            Err(err) => error!("{err:#}"),
                        }
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                get_catalog_view,
                get_filter_options,
                toggle_filter,
                clear_filters,
                set_sort_order,
                toggle_compare,
                remove_compare,
                clear_compare,
                get_comparison_sheet,
                reload_catalog,
                get_catalog_settings,
                set_catalog_settings,
                open_virtual_tour,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
