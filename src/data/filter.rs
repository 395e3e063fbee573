//! Filter Module
//! Distinct filter options, equality filtering and table text extraction.

use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

pub const COURSE_COL: &str = "Course";
pub const STATUS_COL: &str = "Admission Status";
pub const YEAR_COL: &str = "Year";

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Distinct values offered in the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub courses: Vec<String>,
    pub statuses: Vec<String>,
}

/// Current drop-down choice. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub course: Option<String>,
    pub status: Option<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        active(&self.course).is_none() && active(&self.status).is_none()
    }
}

/// Rendered text of a frame, ready for the table view and CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Every cell of a column as text, in row order. Uses the same String cast
/// as `apply_filters`, so an offered value always matches its rows.
pub fn column_text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    let Ok(col) = df.column(column) else {
        return Vec::new();
    };

    let cast = match col.cast(&DataType::String) {
        Ok(cast) => cast,
        Err(e) => {
            log::warn!("Column {} has no text form: {}", column, e);
            return vec![None; col.len()];
        }
    };

    match cast.as_materialized_series().str() {
        Ok(text) => text.into_iter().map(|v| v.map(String::from)).collect(),
        Err(_) => vec![None; col.len()],
    }
}

/// Distinct non-null values of a column in first-appearance order.
pub fn unique_values(df: &DataFrame, column: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    column_text(df, column)
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Options for the course and admission-status drop-downs.
pub fn unique_options(df: &DataFrame) -> FilterOptions {
    FilterOptions {
        courses: unique_values(df, COURSE_COL),
        statuses: unique_values(df, STATUS_COL),
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Keep rows whose course and status equal the selection. Empty
/// predicates are skipped.
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame, FilterError> {
    let mut lazy = df.clone().lazy();

    if let Some(course) = active(&selection.course) {
        lazy = lazy.filter(col(COURSE_COL).cast(DataType::String).eq(lit(course)));
    }
    if let Some(status) = active(&selection.status) {
        lazy = lazy.filter(col(STATUS_COL).cast(DataType::String).eq(lit(status)));
    }

    let filtered = lazy.collect()?;
    log::debug!(
        "Filter course={:?} status={:?}: {} of {} rows",
        selection.course,
        selection.status,
        filtered.height(),
        df.height()
    );
    Ok(filtered)
}

/// Render every cell of the frame as text. Nulls become empty strings.
pub fn table_data(df: &DataFrame) -> TableData {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let columns: Vec<Vec<Option<String>>> =
        headers.iter().map(|h| column_text(df, h)).collect();

    let rows = (0..df.height())
        .map(|r| {
            columns
                .iter()
                .map(|c| c.get(r).cloned().flatten().unwrap_or_default())
                .collect()
        })
        .collect();

    TableData { headers, rows }
}
