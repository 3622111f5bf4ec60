//! Immutable collision dataset and read-only views over it.

use super::record::*;
use polars::prelude::*;
use std::sync::Arc;

/// The full in-memory collection of loaded records for a session.
///
/// Holds the normalized table (every source column, lowercase names) next to
/// the typed records; row `i` of the frame is `records()[i]`. Clones share the
/// same allocation.
#[derive(Debug, Clone)]
pub struct Dataset {
    inner: Arc<DatasetInner>,
}

#[derive(Debug)]
struct DatasetInner {
    frame: DataFrame,
    records: Vec<CollisionRecord>,
}

impl Dataset {
    pub(crate) fn from_parts(frame: DataFrame, records: Vec<CollisionRecord>) -> Self {
        debug_assert_eq!(frame.height(), records.len());
        Self {
            inner: Arc::new(DatasetInner { frame, records }),
        }
    }

    /// Build a dataset directly from typed records.
    ///
    /// The table gets the canonical column set, `date/time` first.
    pub fn from_records(records: Vec<CollisionRecord>) -> PolarsResult<Self> {
        let timestamps = DatetimeChunked::from_naive_datetime(
            DATE_TIME.into(),
            records.iter().map(|r| r.timestamp),
            TimeUnit::Milliseconds,
        );

        let frame = DataFrame::new(vec![
            Column::from(timestamps.into_series()),
            Column::new(
                LATITUDE.into(),
                records.iter().map(|r| r.latitude).collect::<Vec<f64>>(),
            ),
            Column::new(
                LONGITUDE.into(),
                records.iter().map(|r| r.longitude).collect::<Vec<f64>>(),
            ),
            Column::new(
                INJURED_PERSONS.into(),
                records.iter().map(|r| r.injured_persons).collect::<Vec<_>>(),
            ),
            Column::new(
                INJURED_PEDESTRIANS.into(),
                records
                    .iter()
                    .map(|r| r.injured_pedestrians)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                INJURED_CYCLISTS.into(),
                records.iter().map(|r| r.injured_cyclists).collect::<Vec<_>>(),
            ),
            Column::new(
                INJURED_MOTORISTS.into(),
                records.iter().map(|r| r.injured_motorists).collect::<Vec<_>>(),
            ),
            Column::new(
                ON_STREET_NAME.into(),
                records
                    .iter()
                    .map(|r| r.on_street_name.clone())
                    .collect::<Vec<Option<String>>>(),
            ),
        ])?;

        Ok(Self::from_parts(frame, records))
    }

    pub fn records(&self) -> &[CollisionRecord] {
        &self.inner.records
    }

    /// Normalized table backing the raw-data panel.
    pub fn frame(&self) -> &DataFrame {
        &self.inner.frame
    }

    pub fn column_names(&self) -> Vec<String> {
        self.inner
            .frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// View over every record.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            dataset: self,
            rows: (0..self.len()).collect(),
        }
    }

    /// True when both handles share one allocation.
    pub fn ptr_eq(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.column_names() == other.column_names() && self.records() == other.records())
    }
}

/// A read-only projection of a dataset, stored as row indices.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    /// Keep the rows of this view whose record satisfies `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> DatasetView<'a>
    where
        F: FnMut(&CollisionRecord) -> bool,
    {
        let records = self.dataset.records();
        DatasetView {
            dataset: self.dataset,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|&i| predicate(&records[i]))
                .collect(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CollisionRecord> + '_ {
        let records = self.dataset.records();
        self.rows.iter().map(move |&i| &records[i])
    }

    /// Row indices into the base dataset.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
