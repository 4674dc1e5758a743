pub mod engine;
pub mod numeric;
pub mod sort;
pub mod state;

pub use engine::filter_designs;
pub use sort::{sort_designs, SortOrder};
pub use state::{FilterKey, FilterSelection};
