//! Spreadsheet Loader Module
//! Handles CSV / Excel loading, required-column validation and row cleanup.

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every admission sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Name", "Course", "Year", "Admission Status"];

/// Cell texts read as missing in both CSV and Excel input.
/// Matched exactly, without trimming.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

static EMPTY_CELL: Data = Data::Empty;

fn is_null_marker(text: &str) -> bool {
    NULL_MARKERS.contains(&text)
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Failed to load CSV: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to read workbook: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("Workbook has no data")]
    EmptySheet,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Spreadsheet flavour, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(FileKind::Excel),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads admission spreadsheets into a Polars DataFrame.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Read a spreadsheet, check the required columns and drop rows with
    /// a null in any of them.
    pub fn load_file(path: &Path) -> Result<DataFrame, LoaderError> {
        let kind = FileKind::from_path(path)?;
        std::fs::File::open(path).map_err(|e| LoaderError::Io(path.display().to_string(), e))?;

        let df = match kind {
            FileKind::Csv => Self::read_csv(path)?,
            FileKind::Excel => Self::read_excel(path)?,
        };

        Self::validate_columns(&df)?;
        let cleaned = Self::drop_incomplete_rows(&df)?;

        log::info!(
            "Loaded {}: {} rows kept of {} ({} columns)",
            path.display(),
            cleaned.height(),
            df.height(),
            cleaned.width()
        );
        Ok(cleaned)
    }

    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumns(
                NULL_MARKERS.iter().copied().map(PlSmallStr::from_static).collect(),
            )))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// First worksheet, first row as header. Header names are kept as
    /// written; repeats are suffixed the way the CSV reader does.
    fn read_excel(path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoaderError::EmptySheet)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header = rows.next().ok_or(LoaderError::EmptySheet)?;
        let body: Vec<&[Data]> = rows.collect();

        let mut columns = Vec::with_capacity(header.len());
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, head) in header.iter().enumerate() {
            let base = match head {
                Data::Empty => format!("Unnamed: {}", idx),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = match *count {
                0 => base,
                n => format!("{}_duplicated_{}", base, n - 1),
            };
            *count += 1;

            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&EMPTY_CELL))
                .collect();
            columns.push(Self::excel_column(&name, &cells));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Build a typed column from workbook cells. Empty cells, error cells,
    /// NaN and null-marker strings become nulls.
    fn excel_column(name: &str, cells: &[&Data]) -> Column {
        let is_missing = |cell: &Data| match cell {
            Data::Empty | Data::Error(_) => true,
            Data::Float(f) => f.is_nan(),
            Data::String(s) => is_null_marker(s),
            _ => false,
        };

        let numbers: Option<Vec<Option<f64>>> = cells
            .iter()
            .map(|cell| match cell {
                c if is_missing(c) => Some(None),
                Data::Int(i) => Some(Some(*i as f64)),
                Data::Float(f) => Some(Some(*f)),
                _ => None,
            })
            .collect();

        if let Some(numbers) = numbers {
            let all_whole = numbers
                .iter()
                .flatten()
                .all(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64);
            if all_whole {
                let ints: Vec<Option<i64>> =
                    numbers.iter().map(|v| v.map(|f| f as i64)).collect();
                return Column::new(name.into(), ints);
            }
            return Column::new(name.into(), numbers);
        }

        let text: Vec<Option<String>> = cells
            .iter()
            .map(|cell| match cell {
                c if is_missing(c) => None,
                Data::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect();
        Column::new(name.into(), text)
    }

    /// Fail on the first required column the frame lacks.
    pub fn validate_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for required in REQUIRED_COLUMNS {
            if !present.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }

    /// Keep only rows whose required columns are all non-null.
    pub fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame, LoaderError> {
        let mut mask = BooleanChunked::full("mask".into(), true, df.height());
        for required in REQUIRED_COLUMNS {
            let not_null = df.column(required)?.as_materialized_series().is_not_null();
            mask = &mask & &not_null;
        }
        Ok(df.filter(&mask)?)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for background loading)
    pub fn set_dataframe(&mut self, df: DataFrame, path: PathBuf) {
        self.df = Some(df);
        self.file_path = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_rows_with_missing_required_values_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "admissions.csv",
            "Name,Course,Year,Admission Status,Score\n\
             Ana,CS,2021,Admitted,88\n\
             Ben,,2021,Pending,71\n\
             Cleo,Math,,Rejected,64\n\
             Dev,Math,2022,Admitted,\n",
        );

        let df = DataLoader::load_file(&path).unwrap();
        assert_eq!(df.height(), 2);

        let names: Vec<String> = df
            .column("Name")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect();
        // A null in a non-required column does not drop the row
        assert_eq!(names, vec!["Ana", "Dev"]);
    }

    fn texts(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(String::from))
            .collect()
    }

    #[test]
    fn csv_missing_value_markers_drop_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "markers.csv",
            "Name,Course,Year,Admission Status\n\
             Ana,CS,2021,Admitted\n\
             Ben,N/A,2021,Pending\n\
             Cleo,Math,2022,NA\n\
             Dev,null,2022,Admitted\n\
             Eli,Math,NaN,Rejected\n\
             Fay,#N/A,2023,Admitted\n\
             Gus, ,2023,Admitted\n",
        );

        let df = DataLoader::load_file(&path).unwrap();
        assert_eq!(
            texts(&df, "Name"),
            vec![Some("Ana".to_string()), Some("Gus".to_string())]
        );
        // Whitespace is a value, not a missing marker
        assert_eq!(texts(&df, "Course")[1].as_deref(), Some(" "));
        assert_eq!(df.column("Year").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn excel_cells_use_the_same_missing_markers() {
        use calamine::CellErrorType;

        let cells = [
            Data::String("N/A".to_string()),
            Data::Error(CellErrorType::NA),
            Data::Float(f64::NAN),
            Data::String(" ".to_string()),
            Data::String("CS".to_string()),
            Data::Empty,
        ];
        let refs: Vec<&Data> = cells.iter().collect();
        let column = DataLoader::excel_column("Course", &refs);
        let values: Vec<Option<String>> = column
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(String::from))
            .collect();
        assert_eq!(
            values,
            vec![None, None, None, Some(" ".to_string()), Some("CS".to_string()), None]
        );

        let years = [
            Data::Int(2021),
            Data::Error(CellErrorType::Value),
            Data::String("NA".to_string()),
        ];
        let refs: Vec<&Data> = years.iter().collect();
        let column = DataLoader::excel_column("Year", &refs);
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xlsx");

        let err = DataLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Io(..)));
    }

    #[test]
    fn header_names_are_not_trimmed_in_either_format() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(
            &dir,
            "padded.csv",
            "Name ,Course,Year,Admission Status\nAna,CS,2021,Admitted\n",
        );
        let err = DataLoader::load_file(&csv).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Name"));

        let xlsx = dir.path().join("padded.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, head) in ["Name ", "Course", "Year", "Admission Status"].iter().enumerate() {
            sheet.write_string(0, c as u16, *head).unwrap();
        }
        sheet.write_string(1, 0, "Ana").unwrap();
        workbook.save(&xlsx).unwrap();

        let err = DataLoader::load_file(&xlsx).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Name"));
    }

    #[test]
    fn repeated_excel_headers_are_suffixed_like_csv() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repeated.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, head) in ["Name", "Course", "Year", "Admission Status", "Course", "Course"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, c as u16, *head).unwrap();
            sheet.write_string(1, c as u16, "x").unwrap();
        }
        workbook.save(&path).unwrap();

        let df = DataLoader::load_file(&path).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            ["Name", "Course", "Year", "Admission Status", "Course_duplicated_0", "Course_duplicated_1"]
        );
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "Name,Course,Year\nAna,CS,2021\n");

        let err = DataLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Admission Status"));
        assert_eq!(err.to_string(), "Missing required column: Admission Status");
    }

    #[test]
    fn first_missing_column_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "Name,Year\nAna,2021\n");

        let err = DataLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Course"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "notes.txt", "Name\n");

        let err = DataLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }

    #[test]
    fn file_kind_ignores_extension_case() {
        assert_eq!(
            FileKind::from_path(Path::new("a/B.CSV")).unwrap(),
            FileKind::Csv
        );
        assert_eq!(
            FileKind::from_path(Path::new("sheet.XLSX")).unwrap(),
            FileKind::Excel
        );
        assert_eq!(
            FileKind::from_path(Path::new("legacy.xls")).unwrap(),
            FileKind::Excel
        );
    }

    #[test]
    fn xlsx_is_loaded_with_typed_columns() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admissions.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, head) in REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, c as u16, *head).unwrap();
        }
        sheet.write_string(1, 0, "Ana").unwrap();
        sheet.write_string(1, 1, "CS").unwrap();
        sheet.write_number(1, 2, 2021.0).unwrap();
        sheet.write_string(1, 3, "Admitted").unwrap();
        // Row 2 has no status cell
        sheet.write_string(2, 0, "Ben").unwrap();
        sheet.write_string(2, 1, "Math").unwrap();
        sheet.write_number(2, 2, 2022.0).unwrap();
        sheet.write_string(3, 0, "Cleo").unwrap();
        sheet.write_string(3, 1, "Math").unwrap();
        sheet.write_number(3, 2, 2023.0).unwrap();
        sheet.write_string(3, 3, "Pending").unwrap();
        workbook.save(&path).unwrap();

        let df = DataLoader::load_file(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Year").unwrap().dtype(), &DataType::Int64);

        let mut loader = DataLoader::new();
        loader.set_dataframe(df, path.clone());
        assert_eq!(loader.get_row_count(), 2);
        assert_eq!(loader.get_columns(), REQUIRED_COLUMNS.to_vec());
        assert_eq!(loader.get_file_path(), Some(&path));
    }
}
