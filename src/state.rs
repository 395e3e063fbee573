//! Application State
//! Loaded data, filter choice and the derived chart and table views.

use crate::charts::ChartSummary;
use crate::data::{
    apply_filters, table_data, unique_options, DataLoader, FilterError, FilterOptions,
    FilterSelection, TableData,
};
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// Page shown in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Filters,
    Visualizations,
    Table,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Filters, Page::Visualizations, Page::Table];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Filters => "🧩 Filters",
            Page::Visualizations => "📊 Visualizations",
            Page::Table => "📋 Data Table",
        }
    }
}

/// Application state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Working set of the last upload
    pub loader: DataLoader,
    /// Working set after the applied selection
    pub filtered: Option<DataFrame>,
    pub options: FilterOptions,
    /// Drop-down values being edited on the filters page
    pub selection: FilterSelection,
    pub page: Page,
    pub summary: ChartSummary,
    pub table: TableData,
}

impl AppState {
    /// Replace the working set. Filters reset to "All".
    pub fn set_dataset(&mut self, df: DataFrame, path: PathBuf) {
        self.options = unique_options(&df);
        self.selection = FilterSelection::default();
        self.filtered = Some(df.clone());
        self.loader.set_dataframe(df, path);
        self.refresh_views();
        self.page = Page::Visualizations;
    }

    /// Filter the working set with the current selection and show the charts.
    pub fn apply_selection(&mut self) -> Result<(), FilterError> {
        if let Some(df) = self.loader.get_dataframe() {
            let filtered = apply_filters(df, &self.selection)?;
            if self.selection.is_empty() {
                log::info!("Cleared filters: {} rows", filtered.height());
            } else {
                log::info!(
                    "Applied filters course={:?} status={:?}: {} rows",
                    self.selection.course,
                    self.selection.status,
                    filtered.height()
                );
            }
            self.filtered = Some(filtered);
            self.refresh_views();
        }
        self.page = Page::Visualizations;
        Ok(())
    }

    fn refresh_views(&mut self) {
        match &self.filtered {
            Some(df) => {
                self.summary = ChartSummary::from_frame(df);
                self.table = table_data(df);
            }
            None => {
                self.summary = ChartSummary::default();
                self.table = TableData::default();
            }
        }
    }

    pub fn has_data(&self) -> bool {
        self.loader.get_dataframe().is_some()
    }

    /// Whether the filtered set has any rows to show.
    pub fn has_rows(&self) -> bool {
        self.filtered.as_ref().map(|df| df.height() > 0).unwrap_or(false)
    }

    pub fn filtered_row_count(&self) -> usize {
        self.filtered.as_ref().map(|df| df.height()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn admissions() -> DataFrame {
        df![
            "Name" => ["Ana", "Ben", "Cleo", "Dev"],
            "Course" => ["CS", "Math", "CS", "Bio"],
            "Year" => [2021i64, 2022, 2022, 2023],
            "Admission Status" => ["Admitted", "Pending", "Rejected", "Admitted"],
        ]
        .unwrap()
    }

    #[test]
    fn starts_on_home_without_rows() {
        let state = AppState::default();
        assert_eq!(state.page, Page::Home);
        assert!(!state.has_data());
        assert!(!state.has_rows());
    }

    #[test]
    fn upload_shows_everything_and_resets_selection() {
        let mut state = AppState::default();
        state.selection.course = Some("Law".to_string());

        state.set_dataset(admissions(), PathBuf::from("a.csv"));
        assert_eq!(state.page, Page::Visualizations);
        assert_eq!(state.selection, FilterSelection::default());
        assert_eq!(state.filtered_row_count(), 4);
        assert_eq!(state.options.courses, vec!["CS", "Math", "Bio"]);
        assert_eq!(state.summary.total, 4);
        assert_eq!(state.table.rows.len(), 4);
    }

    #[test]
    fn applying_a_selection_updates_charts_and_table() {
        let mut state = AppState::default();
        state.set_dataset(admissions(), PathBuf::from("a.csv"));
        state.page = Page::Filters;

        state.selection.course = Some("CS".to_string());
        state.apply_selection().unwrap();
        assert_eq!(state.page, Page::Visualizations);
        assert_eq!(state.filtered_row_count(), 2);
        assert_eq!(state.summary.by_course, vec![("CS".to_string(), 2)]);
        assert_eq!(state.table.rows.len(), 2);

        // Filters always apply to the full working set
        state.selection = FilterSelection {
            course: None,
            status: Some("Admitted".to_string()),
        };
        state.apply_selection().unwrap();
        assert_eq!(state.filtered_row_count(), 2);
    }

    #[test]
    fn selection_with_no_match_leaves_no_rows() {
        let mut state = AppState::default();
        state.set_dataset(admissions(), PathBuf::from("a.csv"));

        state.selection.status = Some("Waitlisted".to_string());
        state.apply_selection().unwrap();
        assert!(!state.has_rows());
        assert!(state.summary.is_empty());
    }

    #[test]
    fn new_upload_replaces_previous_set() {
        let mut state = AppState::default();
        state.set_dataset(admissions(), PathBuf::from("a.csv"));
        state.selection.course = Some("CS".to_string());
        state.apply_selection().unwrap();

        let second = df![
            "Name" => ["Fay"],
            "Course" => ["Law"],
            "Year" => [2024i64],
            "Admission Status" => ["Pending"],
        ]
        .unwrap();
        state.set_dataset(second, PathBuf::from("b.csv"));
        assert_eq!(state.filtered_row_count(), 1);
        assert_eq!(state.options.courses, vec!["Law"]);
        assert_eq!(state.loader.get_file_path(), Some(&PathBuf::from("b.csv")));
    }

    #[test]
    fn applying_without_data_just_switches_page() {
        let mut state = AppState::default();
        state.apply_selection().unwrap();
        assert_eq!(state.page, Page::Visualizations);
        assert!(!state.has_rows());
    }
}
