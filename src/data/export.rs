//! Filtered table export.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Polars(#[from] PolarsError),
}

/// Write the frame as CSV with a header row.
pub fn export_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file =
        File::create(path).map_err(|e| ExportError::Io(path.display().to_string(), e))?;

    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)?;

    log::info!("Exported {} rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn exported_csv_has_header_and_rows() {
        let df = df![
            "Name" => ["Ana", "Ben"],
            "Course" => ["CS", "Math"],
            "Year" => [2021i64, 2022],
        ]
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_csv(&df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["Name,Course,Year", "Ana,CS,2021", "Ben,Math,2022"]);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let df = df!["Name" => ["Ana"]].unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");

        assert!(matches!(export_csv(&df, &path), Err(ExportError::Io(..))));
    }
}
