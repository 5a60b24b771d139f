//! Extraction of labeled fields and identifier columns from sheet grids

pub mod fields;
pub mod sheets;
pub mod unique;

pub use fields::extract_fields;
pub use sheets::{locate_sheet, locate_sheet_chain};
pub use unique::collect_unique;
