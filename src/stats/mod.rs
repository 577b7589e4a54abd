//! Stats module - Age binning and descriptive statistics

mod calculator;

pub use calculator::{AgeHistogram, AgeSummary, StatsCalculator, StatsError};
