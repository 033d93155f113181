//! Data module - CSV loading and joining

mod join;
mod loader;
mod table;

pub use join::{join_tables, unmatched, JoinedRecord};
pub use loader::load_both;
pub use table::{IndicatorRow, IndicatorTable};
