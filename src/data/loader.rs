//! CSV Data Loader Module
//! Loads chart records from CSV files using Polars.
//!
//! Required columns: `y`, `x` (numeric) and `label`, `value_label` (text).

use crate::data::Record;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Row {row}: missing or non-finite {field}")]
    InvalidRecord { row: usize, field: &'static str },
}

/// CSV loading with Polars and conversion into chart records.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file into a DataFrame.
    pub fn read_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        let path = file_path.to_string_lossy().to_string();

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(path = %path, rows = df.height(), "read csv");
        Ok(df)
    }

    /// Read a CSV file and convert it into records.
    pub fn load_csv(file_path: &Path) -> Result<Vec<Record>, LoaderError> {
        let df = Self::read_csv(file_path)?;
        Self::records_from_dataframe(&df)
    }

    /// Convert a DataFrame into records. Any bad cell fails the whole conversion.
    pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<Record>, LoaderError> {
        let column = |name: &str, dtype: &DataType| -> Result<Column, LoaderError> {
            let column = df
                .column(name)
                .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
            Ok(column.cast(dtype)?)
        };

        let y = column("y", &DataType::Float64)?;
        let x = column("x", &DataType::Float64)?;
        let label = column("label", &DataType::String)?;
        let value_label = column("value_label", &DataType::String)?;

        let (y, x) = (y.f64()?, x.f64()?);
        let (label, value_label) = (label.str()?, value_label.str()?);

        let finite = |value: Option<f64>, row: usize, field: &'static str| {
            value
                .filter(|v| v.is_finite())
                .ok_or(LoaderError::InvalidRecord { row, field })
        };
        let text = |value: Option<&str>, row: usize, field: &'static str| {
            value
                .map(str::to_string)
                .ok_or(LoaderError::InvalidRecord { row, field })
        };

        (0..df.height())
            .map(|row| -> Result<Record, LoaderError> {
                Ok(Record {
                    y: finite(y.get(row), row, "y")?,
                    x: finite(x.get(row), row, "x")?,
                    label: text(label.get(row), row, "label")?,
                    value_label: text(value_label.get(row), row, "value_label")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_records;
    use std::io::Write;

    #[test]
    fn loads_csv_into_records() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "y,x,label,value_label").unwrap();
        writeln!(file, "0.5,1,jan,50%").unwrap();
        writeln!(file, "0.2,2,feb,20%").unwrap();
        writeln!(file, "0.3,4,mar,30%").unwrap();
        writeln!(file, "0.4,5,apr,40%").unwrap();
        file.flush().unwrap();

        let records = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(records, sample_records());
    }

    #[test]
    fn integer_labels_become_text() {
        let df = df!(
            "y" => [0.1, 0.9],
            "x" => [1i64, 2],
            "label" => [2023i64, 2024],
            "value_label" => ["10%", "90%"]
        )
        .unwrap();
        let records = DataLoader::records_from_dataframe(&df).unwrap();
        assert_eq!(records[1], Record::new(0.9, 2.0, "2024", "90%"));
    }

    #[test]
    fn missing_column_is_reported() {
        let df = df!("y" => [0.5], "x" => [1.0], "label" => ["jan"]).unwrap();
        let err = DataLoader::records_from_dataframe(&df).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(name) if name == "value_label"));
    }

    #[test]
    fn null_cells_fail_the_load() {
        let df = df!(
            "y" => [Some(0.5), None],
            "x" => [1.0, 2.0],
            "label" => ["jan", "feb"],
            "value_label" => ["50%", "20%"]
        )
        .unwrap();
        let err = DataLoader::records_from_dataframe(&df).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::InvalidRecord { row: 1, field: "y" }
        ));
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }
}
