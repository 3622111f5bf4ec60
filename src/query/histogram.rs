//! Per-minute crash histogram.

use crate::data::DatasetView;
use chrono::Timelike;
use serde::{Serialize, Serializer};

pub const MINUTE_BINS: usize = 60;

/// Crash counts bucketed by minute of the hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteHistogram {
    bins: [usize; MINUTE_BINS],
}

impl Default for MinuteHistogram {
    fn default() -> Self {
        Self {
            bins: [0; MINUTE_BINS],
        }
    }
}

impl MinuteHistogram {
    pub fn bins(&self) -> &[usize; MINUTE_BINS] {
        &self.bins
    }

    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    pub fn max(&self) -> usize {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

impl Serialize for MinuteHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.bins.iter())
    }
}

/// Bucket every record of `view` by its minute of the hour.
pub fn minute_histogram(view: &DatasetView<'_>) -> MinuteHistogram {
    let mut histogram = MinuteHistogram::default();
    for record in view.records() {
        histogram.bins[record.timestamp.minute() as usize] += 1;
    }
    histogram
}
