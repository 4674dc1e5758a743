pub mod set;
pub mod sheet;

pub use set::{CompareError, CompareToggle, ComparisonSet, COMPARE_CAPACITY};
pub use sheet::{comparison_sheet, ComparisonSheet};
