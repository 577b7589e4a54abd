//! Statistics Calculator Module
//! Handles age binning and descriptive statistics.

use log::{debug, warn};
use polars::prelude::*;
use statrs::statistics::{Data, Distribution, Max, Median, Min};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Invalid histogram bins: {0}")]
    InvalidBins(String),
    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },
}

/// Counts per bin plus the bin edges (`edges.len() == counts.len() + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct AgeHistogram {
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
}

impl AgeHistogram {
    /// Total number of values that fell into some bin.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate `(lower, upper, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Descriptive statistics of an age column.
#[derive(Debug, Clone)]
pub struct AgeSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for AgeSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations on the loaded table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Evenly spaced edges from `start` to `end` inclusive.
    pub fn bin_edges(start: f64, end: f64, width: f64) -> Result<Vec<f64>, StatsError> {
        if !(width > 0.0) || !width.is_finite() {
            return Err(StatsError::InvalidBins(format!(
                "bin width must be positive, got {}",
                width
            )));
        }
        if !(end > start) || !start.is_finite() || !end.is_finite() {
            return Err(StatsError::InvalidBins(format!(
                "end ({}) must be greater than start ({})",
                end, start
            )));
        }

        let n_bins = ((end - start) / width).round().max(1.0) as usize;
        let edges: Vec<f64> = (0..=n_bins).map(|i| start + i as f64 * width).collect();
        debug!("Histogram edges: {:?}", edges);
        Ok(edges)
    }

    /// Count values per bin.
    ///
    /// Every bin is half-open `[a, b)` except the last, which also includes
    /// its upper edge. Values outside the edges and NaN are skipped.
    pub fn histogram(values: &[f64], edges: &[f64]) -> Result<AgeHistogram, StatsError> {
        if edges.len() < 2 {
            return Err(StatsError::InvalidBins(
                "at least two edges are required".to_string(),
            ));
        }
        if edges.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(StatsError::InvalidBins(
                "edges must be strictly increasing".to_string(),
            ));
        }

        let first = edges[0];
        let last = edges[edges.len() - 1];
        let mut counts = vec![0u64; edges.len() - 1];
        let mut out_of_range = 0usize;

        for &v in values {
            if v.is_nan() {
                continue;
            }
            if v < first || v > last {
                out_of_range += 1;
                continue;
            }

            let idx = if v == last {
                counts.len() - 1
            } else {
                edges.partition_point(|&e| e <= v) - 1
            };
            counts[idx] += 1;
        }

        if out_of_range > 0 {
            warn!(
                "{} values outside [{}, {}] were not counted",
                out_of_range, first, last
            );
        }

        Ok(AgeHistogram {
            counts,
            edges: edges.to_vec(),
        })
    }

    /// Get the non-null values of a numeric column as f64.
    ///
    /// Non-numeric columns are rejected rather than cast to nulls. An all-null
    /// column yields no values.
    pub fn column_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, StatsError> {
        let col = df.column(column)?;
        let numeric = matches!(
            col.dtype(),
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Null
        );
        if !numeric {
            return Err(StatsError::NonNumericColumn {
                column: column.to_string(),
                dtype: col.dtype().to_string(),
            });
        }

        let values = col.strict_cast(&DataType::Float64)?;
        let values = values
            .f64()?
            .into_iter()
            .filter_map(|v| v)
            .collect();
        Ok(values)
    }

    /// Compute descriptive statistics for an array of values.
    pub fn describe(values: &[f64]) -> AgeSummary {
        let values: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = values.len();
        if n == 0 {
            return AgeSummary::default();
        }

        let data = Data::new(values);
        let std = if n > 1 {
            data.std_dev().unwrap_or(f64::NAN)
        } else {
            0.0
        };

        AgeSummary {
            count: n,
            mean: data.mean().unwrap_or(f64::NAN),
            median: data.median(),
            std,
            min: data.min(),
            max: data.max(),
        }
    }
}
