//! CSV Data Loader Module
//! Reads indicator tables with Polars and converts year columns to numbers.

use crate::config::ChartConfig;
use crate::data::table::{parse_value, IndicatorRow, IndicatorTable};
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("CSV {path} has no '{column}' column")]
    MissingKeyColumn { path: PathBuf, column: String },
}

/// Load one indicator table.
///
/// Every column is read as text; the key column stays a string and all
/// others go through [`parse_value`].
pub fn load_table(path: &Path, key_column: &str) -> Result<IndicatorTable, LoaderError> {
    let csv_error = |source| LoaderError::CsvError {
        path: path.to_path_buf(),
        source,
    };

    // Schema length 0 keeps every column as a string column
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(csv_error)?;

    let keys = df
        .column(key_column)
        .map_err(|_| LoaderError::MissingKeyColumn {
            path: path.to_path_buf(),
            column: key_column.to_string(),
        })?
        .as_materialized_series()
        .str()
        .map_err(csv_error)?
        .clone();

    let mut columns: Vec<(String, StringChunked)> = Vec::new();
    for col in df.get_columns() {
        let name = col.name().to_string();
        if name == key_column {
            continue;
        }
        let text = col.as_materialized_series().str().map_err(csv_error)?.clone();
        columns.push((name, text));
    }

    let rows: Vec<IndicatorRow> = (0..df.height())
        .map(|i| {
            let values: HashMap<String, f64> = columns
                .iter()
                .map(|(name, text)| (name.clone(), parse_value(text.get(i))))
                .collect();
            IndicatorRow {
                entity: keys.get(i).unwrap_or_default().to_string(),
                values,
            }
        })
        .collect();

    debug!(
        "{}: {} rows, {} value columns",
        path.display(),
        rows.len(),
        columns.len()
    );

    Ok(IndicatorTable::new(
        key_column,
        columns.into_iter().map(|(name, _)| name).collect(),
        rows,
    ))
}

/// Wait for two independent fallible results and combine them.
///
/// Both closures run to completion concurrently; the first table's error
/// is reported when both fail.
pub fn join_completed<A, B, E, FA, FB>(fa: FA, fb: FB) -> Result<(A, B), E>
where
    FA: FnOnce() -> Result<A, E> + Send,
    FB: FnOnce() -> Result<B, E> + Send,
    A: Send,
    B: Send,
    E: Send,
{
    let (a, b) = rayon::join(fa, fb);
    Ok((a?, b?))
}

/// Load both configured datasets concurrently.
pub fn load_both(config: &ChartConfig) -> Result<(IndicatorTable, IndicatorTable), LoaderError> {
    let key = config.key_column.as_str();
    info!(
        "Loading {} and {}",
        config.first_dataset.display(),
        config.second_dataset.display()
    );

    let (first, second) = join_completed(
        || load_table(&config.first_dataset, key),
        || load_table(&config.second_dataset, key),
    )?;

    let year = config.year_column();
    for (path, table) in [(&config.first_dataset, &first), (&config.second_dataset, &second)] {
        if !table.has_column(&year) {
            warn!("{} has no column for year {}", path.display(), year);
        }
    }

    info!("Loaded {} + {} rows", first.len(), second.len());
    Ok((first, second))
}
