use serde::Serialize;
use serde_json::Value;

pub const VIEW_CHANGED: &str = "catalog-view-changed";
pub const COMPARE_LIMIT_REACHED: &str = "compare-limit-reached";
pub const LOAD_FAILED: &str = "catalog-load-failed";

/// Where controller events go. The desktop shell forwards them to the
/// webview; tests record them.
pub trait EventSink: Send + Sync {
    fn emit_value(&self, event: &str, payload: Value);
}

pub(crate) fn emit<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit_value(event, value),
        Err(err) => log::error!("Failed to serialize {event} payload: {err}"),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareLimitReachedEvent {
    pub session_id: String,
    pub capacity: usize,
    pub design_id: u64,
    pub design_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailedEvent {
    pub session_id: String,
    pub message: String,
}

#[cfg(feature = "desktop")]
impl EventSink for tauri::AppHandle {
    fn emit_value(&self, event: &str, payload: Value) {
        use tauri::Emitter;

        if let Err(err) = self.emit(event, payload) {
            log::error!("Failed to emit {event}: {err}");
        }
    }
}
