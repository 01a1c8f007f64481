//! Roster Loader Module
//! Reads the student CSV with Polars and fills in missing batch labels.

use crate::config::{ColumnSchema, RosterConfig};
use crate::data::batch::extract_batch_year;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found at {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Holds the roster loaded from the configured source.
pub struct RosterLoader {
    df: Option<DataFrame>,
    file_path: PathBuf,
    columns: ColumnSchema,
}

impl RosterLoader {
    pub fn new(config: &RosterConfig) -> Self {
        Self {
            df: None,
            file_path: config.source_path.clone(),
            columns: config.columns.clone(),
        }
    }

    /// (Re)load the roster. A failed load clears any previous data.
    pub fn load(&mut self) -> Result<&DataFrame, LoaderError> {
        self.df = None;
        let df = load_roster(&self.file_path, &self.columns)?;
        Ok(self.df.insert(df))
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Read every column as text and make sure each row carries a batch label.
///
/// The name, enrollment and roll number columns must be present; batch is optional.
pub fn load_roster(path: &Path, columns: &ColumnSchema) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::SourceNotFound(path.to_path_buf()));
    }

    // Schema inference off: enrollment and roll numbers keep leading zeros
    let mut df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    for required in [&columns.name, &columns.enrollment_number, &columns.roll_number] {
        if df.get_column_index(required).is_none() {
            return Err(LoaderError::MissingColumn(required.clone()));
        }
    }

    let batches = derive_batches(&df, columns)?;
    df.with_column(Column::new(columns.batch.as_str().into(), batches))?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded roster"
    );
    Ok(df)
}

/// Batch label per row: the provided value, or one derived from the enrollment number
/// when the cell is null or blank.
fn derive_batches(df: &DataFrame, columns: &ColumnSchema) -> Result<Vec<String>, LoaderError> {
    let enrollment = df
        .column(&columns.enrollment_number)?
        .as_materialized_series()
        .str()?;

    let batches: Vec<String> = match df.get_column_index(&columns.batch) {
        Some(idx) => {
            let provided = df.get_columns()[idx].as_materialized_series().str()?;
            let mut derived = 0usize;
            let batches = provided
                .into_iter()
                .zip(enrollment)
                .map(|(batch, enrollment)| match batch {
                    Some(batch) if !batch.trim().is_empty() => batch.to_string(),
                    _ => {
                        derived += 1;
                        extract_batch_year(enrollment.unwrap_or_default())
                    }
                })
                .collect();
            debug!(derived, "filled missing batch labels");
            batches
        }
        None => {
            debug!("no batch column, deriving from enrollment numbers");
            enrollment
                .into_iter()
                .map(|enrollment| extract_batch_year(enrollment.unwrap_or_default()))
                .collect()
        }
    };

    Ok(batches)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::batch::UNKNOWN_BATCH;
    use tempfile::TempDir;

    pub(crate) const ROSTER_CSV: &str = "\
Name,Enrollment_Number,Roll_Number
Anita Shah,NED-24012/2001-2002,CT-001
Farhan Ali,NED-23019/2000-,CT-002
Bilal Khan,NED/0073/08-09,BCIT-0073
Sana Mirza,NED-ABCDE,CT-004
Ali Raza,NED-26000/1/2001-2002,CT-005
";

    pub(crate) fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn column_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_derives_batch_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "students.csv", ROSTER_CSV);

        let df = load_roster(&path, &ColumnSchema::default()).unwrap();
        assert_eq!(df.height(), 5);
        let names: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["Name", "Enrollment_Number", "Roll_Number", "Batch"]);
        assert_eq!(
            column_values(&df, "Batch"),
            vec![
                Some("2001 - 2002".to_string()),
                Some("2000 - 2001".to_string()),
                Some("2008 - 2009".to_string()),
                Some(UNKNOWN_BATCH.to_string()),
                Some("2001 - 2002".to_string()),
            ]
        );
    }

    #[test]
    fn test_keeps_provided_batch_and_fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "students.csv",
            "Name,Enrollment_Number,Roll_Number,Batch\n\
             Anita,NED-24012/2001-2002,CT-001,Evening\n\
             Farhan,NED/0073/08-09,CT-0002,\n",
        );

        let df = load_roster(&path, &ColumnSchema::default()).unwrap();
        assert_eq!(
            column_values(&df, "Batch"),
            vec![Some("Evening".to_string()), Some("2008 - 2009".to_string())]
        );
        // text columns are not coerced
        assert_eq!(
            column_values(&df, "Roll_Number")[1],
            Some("CT-0002".to_string())
        );
    }

    #[test]
    fn test_blank_batch_cells_are_derived() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "students.csv",
            "Name,Enrollment_Number,Roll_Number,Batch\n\
             A,NED/0073/08-09,1,\"\"\n\
             B,NED-23019/2000-,2,\"  \"\n\
             C,NED-24012/2001-2002,3,\n",
        );

        let df = load_roster(&path, &ColumnSchema::default()).unwrap();
        assert_eq!(
            column_values(&df, "Batch"),
            vec![
                Some("2008 - 2009".to_string()),
                Some("2000 - 2001".to_string()),
                Some("2001 - 2002".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = RosterConfig {
            source_path: dir.path().join("absent.csv"),
            ..RosterConfig::default()
        };

        let mut loader = RosterLoader::new(&config);
        assert!(matches!(
            loader.load(),
            Err(LoaderError::SourceNotFound(p)) if p == config.source_path
        ));
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "students.csv", "Name,Roll_Number\nAnita,CT-001\n");

        let err = load_roster(&path, &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == "Enrollment_Number"));

        let path = write_csv(
            &dir,
            "no_roll.csv",
            "Name,Enrollment_Number\nAnita,NED-24012/2001-2002\n",
        );
        let err = load_roster(&path, &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == "Roll_Number"));
    }

    #[test]
    fn test_custom_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "students.csv",
            "Student,Enrollment,Roll\nAnita,NED/0001/04-05,CT-001\n",
        );
        let columns = ColumnSchema {
            name: "Student".to_string(),
            enrollment_number: "Enrollment".to_string(),
            roll_number: "Roll".to_string(),
            batch: "Session".to_string(),
        };

        let df = load_roster(&path, &columns).unwrap();
        assert_eq!(
            column_values(&df, "Session"),
            vec![Some("2004 - 2005".to_string())]
        );
    }
}
