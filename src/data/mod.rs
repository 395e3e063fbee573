//! Data module - spreadsheet loading, filtering and export

mod export;
mod filter;
mod loader;

pub use export::export_csv;
pub use filter::{
    apply_filters, column_text, table_data, unique_options, FilterError, FilterOptions,
    FilterSelection, TableData, COURSE_COL, STATUS_COL, YEAR_COL,
};
pub use loader::DataLoader;
