//! JSON Data Loader Module
//! Handles questionnaire file loading and required-column checks using Polars.

use log::{debug, info};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
    #[error("Unsupported JSON layout: expected an array of records or an object of columns")]
    UnsupportedLayout,
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

/// Loads a JSON-encoded table into a Polars DataFrame.
pub struct DataLoader;

impl DataLoader {
    /// Read a JSON table and check that every column in `required` exists.
    ///
    /// Both the records layout (`[{..}, {..}]`) and the pandas columns layout
    /// (`{"col": {"0": v, "1": v}}`) are accepted.
    pub fn read_json(path: &Path, required: &[&str]) -> Result<DataFrame, LoaderError> {
        let text = fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&text)?;

        let records = match root {
            Value::Array(rows) => rows,
            Value::Object(columns) => Self::columns_to_records(columns)?,
            _ => return Err(LoaderError::UnsupportedLayout),
        };
        debug!("Parsed {} records from {}", records.len(), path.display());

        let df = Self::records_to_frame(records)?;
        Self::require_columns(&df, required)?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }

    /// Build a DataFrame from an array of JSON records.
    fn records_to_frame(records: Vec<Value>) -> Result<DataFrame, LoaderError> {
        if records.is_empty() {
            return Ok(DataFrame::empty());
        }

        let bytes = serde_json::to_vec(&Value::Array(records))?;
        let df = JsonReader::new(Cursor::new(bytes))
            .with_json_format(JsonFormat::Json)
            .infer_schema_len(None)
            .finish()?;
        Ok(df)
    }

    /// Transpose the pandas "columns" layout into records, ordering rows by
    /// their index key.
    fn columns_to_records(columns: Map<String, Value>) -> Result<Vec<Value>, LoaderError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut keys: Vec<String> = Vec::new();
        for cells in columns.values() {
            let cells = cells.as_object().ok_or(LoaderError::UnsupportedLayout)?;
            for key in cells.keys() {
                if seen.insert(key.as_str()) {
                    keys.push(key.clone());
                }
            }
        }

        // integer keys first in numeric order, then the rest lexicographically
        keys.sort_by_cached_key(|key| {
            let numeric = key.parse::<i64>().ok().map_or((1, 0), |n| (0, n));
            (numeric, key.clone())
        });

        let records = keys
            .iter()
            .map(|key| {
                let row: Map<String, Value> = columns
                    .iter()
                    .map(|(name, cells)| {
                        let value = cells.get(key).cloned().unwrap_or(Value::Null);
                        (name.clone(), value)
                    })
                    .collect();
                Value::Object(row)
            })
            .collect();

        Ok(records)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), LoaderError> {
        for name in required {
            if df.get_column_index(name).is_none() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}
