//! CSV Data Loader Module
//! Loads a bounded sample of collision rows with Polars and normalizes it.

use super::dataset::Dataset;
use super::record::*;
use super::timestamp::parse_crash_timestamp;
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns a source file must provide (matched case-insensitively).
pub const REQUIRED_COLUMNS: [&str; 8] = [
    CRASH_DATE,
    CRASH_TIME,
    LATITUDE,
    LONGITUDE,
    INJURED_PERSONS,
    INJURED_PEDESTRIANS,
    INJURED_CYCLISTS,
    INJURED_MOTORISTS,
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Dataset {} is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Row cap must be at least 1")]
    InvalidRowCap,
    #[error("Required column missing: {0}")]
    MissingColumn(&'static str),
    #[error("Row {0} lost its timestamp or coordinates after cleaning")]
    IncompleteRow(usize),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

#[derive(Error, Debug)]
#[error("Cannot parse crash date/time {value:?} on data row {row}")]
pub struct ParseError {
    /// 1-based data row within the rows read.
    pub row: usize,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<PolarsError> for DatasetError {
    fn from(err: PolarsError) -> Self {
        DatasetError::Load(LoadError::CsvError(err))
    }
}

/// Reads collision CSV files into normalized datasets.
pub struct DataLoader;

impl DataLoader {
    /// Load at most `max_rows` data rows from `path`.
    ///
    /// Crash date and time are merged into `date/time`, rows without both
    /// coordinates are dropped and every column name is lowercased.
    pub fn load(path: &Path, max_rows: usize) -> Result<Dataset, DatasetError> {
        if max_rows == 0 {
            return Err(LoadError::InvalidRowCap.into());
        }
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()).into());
        }
        File::open(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut df = LazyCsvReader::new(path)
            .with_n_rows(Some(max_rows))
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        let rows_read = df.height();

        let names = Self::resolve_columns(&df)?;
        let timestamps = Self::parse_timestamps(&df, &names)?;

        df.drop_in_place(&names[CRASH_DATE])?;
        df.drop_in_place(&names[CRASH_TIME])?;
        df.insert_column(
            0,
            DatetimeChunked::from_naive_datetime(
                DATE_TIME.into(),
                timestamps,
                TimeUnit::Milliseconds,
            )
            .into_series(),
        )?;

        // Unparsable coordinates become null here and are dropped with the empty ones.
        let latitude = names[LATITUDE].as_str();
        let longitude = names[LONGITUDE].as_str();
        let mut df = df
            .lazy()
            .with_columns([
                col(latitude).cast(DataType::Float64),
                col(longitude).cast(DataType::Float64),
            ])
            .filter(col(latitude).is_not_null().and(col(longitude).is_not_null()))
            .collect()?;
        debug!(
            "dropped {} rows without coordinates",
            rows_read - df.height()
        );

        let current: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for name in current {
            let lower = name.to_lowercase();
            if lower != name {
                df.rename(&name, lower.into())?;
            }
        }

        let records = Self::build_records(&df)?;
        info!(
            "loaded {} of {} rows from {}",
            records.len(),
            rows_read,
            path.display()
        );

        Ok(Dataset::from_parts(df, records))
    }

    /// Map each required lowercase column name to its name in the source.
    fn resolve_columns(df: &DataFrame) -> Result<HashMap<&'static str, String>, LoadError> {
        let by_lower: HashMap<String, String> = df
            .get_column_names()
            .iter()
            .map(|s| (s.to_lowercase(), s.to_string()))
            .collect();

        REQUIRED_COLUMNS
            .iter()
            .map(|&required| {
                by_lower
                    .get(required)
                    .map(|actual| (required, actual.clone()))
                    .ok_or(LoadError::MissingColumn(required))
            })
            .collect()
    }

    fn parse_timestamps(
        df: &DataFrame,
        names: &HashMap<&'static str, String>,
    ) -> Result<Vec<chrono::NaiveDateTime>, DatasetError> {
        let dates = string_values(df, &names[CRASH_DATE])?;
        let times = string_values(df, &names[CRASH_TIME])?;

        dates
            .into_iter()
            .zip(times)
            .enumerate()
            .map(|(i, (date, time))| {
                let parsed = match (&date, &time) {
                    (Some(date), Some(time)) => parse_crash_timestamp(date, time),
                    _ => None,
                };
                parsed.ok_or_else(|| {
                    ParseError {
                        row: i + 1,
                        value: format!(
                            "{} {}",
                            date.as_deref().unwrap_or("<null>"),
                            time.as_deref().unwrap_or("<null>")
                        ),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Build typed records from a normalized (lowercase) frame.
    fn build_records(df: &DataFrame) -> Result<Vec<CollisionRecord>, LoadError> {
        let timestamps = df.column(DATE_TIME)?.as_materialized_series().datetime()?;
        let timestamps: Vec<_> = timestamps.as_datetime_iter().collect();
        let latitudes = f64_values(df, LATITUDE)?;
        let longitudes = f64_values(df, LONGITUDE)?;
        let persons = count_values(df, INJURED_PERSONS)?;
        let pedestrians = count_values(df, INJURED_PEDESTRIANS)?;
        let cyclists = count_values(df, INJURED_CYCLISTS)?;
        let motorists = count_values(df, INJURED_MOTORISTS)?;
        let streets = if df.get_column_index(ON_STREET_NAME).is_some() {
            string_values(df, ON_STREET_NAME)?
        } else {
            vec![None; df.height()]
        };

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(timestamp), Some(latitude), Some(longitude)) =
                (timestamps[i], latitudes[i], longitudes[i])
            else {
                return Err(LoadError::IncompleteRow(i + 1));
            };
            records.push(CollisionRecord {
                timestamp,
                latitude,
                longitude,
                injured_persons: persons[i],
                injured_pedestrians: pedestrians[i],
                injured_cyclists: cyclists[i],
                injured_motorists: motorists[i],
                on_street_name: streets[i].clone(),
            });
        }

        Ok(records)
    }
}

fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column.f64()?.into_iter().collect();
    Ok(values)
}

/// Injury counts; negative or non-finite values count as missing.
fn count_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<u32>>> {
    Ok(f64_values(df, name)?
        .into_iter()
        .map(|v| v.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u32))
        .collect())
}
