#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod events;
pub mod models;
pub mod snapshot;
pub mod view;

pub use controller::{CatalogController, CompareOutcome};
pub use models::{DesignId, FilterOption, FilterOptions, HouseDesign};
pub use snapshot::{CatalogSnapshot, SnapshotSource};
pub use view::{CatalogView, LoadStatus};
