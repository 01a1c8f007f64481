//! CSV Export Module
//! Writes the current view back out as CSV.

use chrono::NaiveDateTime;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// `filtered_students_<YYYYMMDD>_<HHMMSS>.csv` for the given request time.
pub fn export_file_name(requested_at: NaiveDateTime) -> String {
    format!(
        "filtered_students_{}.csv",
        requested_at.format("%Y%m%d_%H%M%S")
    )
}

/// Serialize all columns of `df` with a header row.
pub fn export_csv<W: Write>(df: &DataFrame, writer: W) -> Result<(), ExportError> {
    let mut df = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

/// Write the export to `path`, returning the number of rows written.
pub fn export_to_path(df: &DataFrame, path: &Path) -> Result<usize, ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    export_csv(df, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), rows = df.height(), "exported roster");
    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSchema;
    use crate::data::loader::load_roster;
    use crate::data::loader::tests::{write_csv, ROSTER_CSV};
    use crate::data::{BatchSelection, RosterView};
    use chrono::NaiveDate;

    #[test]
    fn test_export_file_name() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        assert_eq!(export_file_name(at), "filtered_students_20240307_090530.csv");
    }

    #[test]
    fn test_export_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "students.csv", ROSTER_CSV);
        let df = load_roster(&path, &ColumnSchema::default()).unwrap();

        let mut buf = Vec::new();
        export_csv(&df.head(Some(1)), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Enrollment_Number,Roll_Number,Batch")
        );
        assert_eq!(
            lines.next(),
            Some("Anita Shah,NED-24012/2001-2002,CT-001,2001 - 2002")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "students.csv", ROSTER_CSV);
        let columns = ColumnSchema::default();
        let df = load_roster(&path, &columns).unwrap();

        let selection = BatchSelection::Batch("2001 - 2002".to_string());
        let view = RosterView::compute(&df, &columns, &selection, "ali").unwrap();

        let out = dir.path().join("export.csv");
        let rows = export_to_path(&view.matches, &out).unwrap();
        assert_eq!(rows, 1);

        let reloaded = load_roster(&out, &columns).unwrap();
        assert_eq!(reloaded.get_column_names(), view.matches.get_column_names());
        assert!(reloaded.equals_missing(&view.matches));
    }

    #[test]
    fn test_round_trip_quoted_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "students.csv",
            "Name,Enrollment_Number,Roll_Number\n\"Khan, Bilal\",NED/0073/08-09,0073\n",
        );
        let columns = ColumnSchema::default();
        let df = load_roster(&path, &columns).unwrap();

        let out = dir.path().join("export.csv");
        export_to_path(&df, &out).unwrap();
        let reloaded = load_roster(&out, &columns).unwrap();
        assert!(reloaded.equals_missing(&df));
    }
}
