//! Questionnaire Analysis
//! Ties loading, email cleaning and the age histogram to one data file.

use crate::charts::{PlotError, StaticChartRenderer};
use crate::config::AnalysisConfig;
use crate::data::{DataLoader, DataProcessor, LoaderError, ProcessorError};
use crate::stats::{AgeHistogram, AgeSummary, StatsCalculator, StatsError};
use log::debug;
use polars::prelude::DataFrame;
use std::any::Any;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Data path must be a string or a path")]
    InvalidPathType,
    #[error("Data file {0} does not exist")]
    PathNotFound(PathBuf),
    #[error("No data loaded, call read_data first")]
    NotLoaded,
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Reads and analyzes the data produced by the questionnaire experiment.
#[derive(Debug)]
pub struct QuestionnaireAnalysis {
    data_fname: PathBuf,
    data: Option<DataFrame>,
    config: AnalysisConfig,
}

impl QuestionnaireAnalysis {
    /// Create an analysis for an existing file. The data is not read yet.
    pub fn new(data_fname: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let data_fname = data_fname.as_ref();
        if !data_fname.exists() {
            return Err(AnalysisError::PathNotFound(data_fname.to_path_buf()));
        }

        Ok(Self {
            data_fname: data_fname.to_path_buf(),
            data: None,
            config: AnalysisConfig::default(),
        })
    }

    /// Like [`QuestionnaireAnalysis::new`], for callers holding an untyped
    /// value. Only `String`, `&str`, `PathBuf` and `&Path` are accepted.
    pub fn from_dynamic(data_fname: &dyn Any) -> Result<Self, AnalysisError> {
        if let Some(s) = data_fname.downcast_ref::<String>() {
            Self::new(s)
        } else if let Some(s) = data_fname.downcast_ref::<&str>() {
            Self::new(s)
        } else if let Some(p) = data_fname.downcast_ref::<PathBuf>() {
            Self::new(p)
        } else if let Some(p) = data_fname.downcast_ref::<&Path>() {
            Self::new(p)
        } else {
            Err(AnalysisError::InvalidPathType)
        }
    }

    /// Replace the default column names, bins and plot settings.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Path of the questionnaire data file.
    pub fn path(&self) -> &Path {
        &self.data_fname
    }

    /// Current analysis settings.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The loaded table, if [`read_data`](Self::read_data) has run.
    pub fn data(&self) -> Option<&DataFrame> {
        self.data.as_ref()
    }

    /// Read the JSON file into memory, replacing any previously loaded table.
    pub fn read_data(&mut self) -> Result<(), AnalysisError> {
        let required = [
            self.config.age_column.as_str(),
            self.config.email_column.as_str(),
        ];
        let df = DataLoader::read_json(&self.data_fname, &required)?;
        self.data = Some(df);
        Ok(())
    }

    fn loaded(&self) -> Result<&DataFrame, AnalysisError> {
        self.data.as_ref().ok_or(AnalysisError::NotLoaded)
    }

    /// Bin the participants' ages and return counts with the bin edges.
    ///
    /// When a plot output is configured, the histogram is also saved there.
    pub fn show_age_distrib(&self) -> Result<AgeHistogram, AnalysisError> {
        let df = self.loaded()?;
        let ages = StatsCalculator::column_values(df, &self.config.age_column)?;

        let bins = &self.config.histogram;
        let edges = StatsCalculator::bin_edges(bins.start, bins.end, bins.width)?;
        let hist = StatsCalculator::histogram(&ages, &edges)?;

        match &self.config.plot.output {
            Some(output) => {
                StaticChartRenderer::render_histogram(&hist, &self.config.plot, output)?
            }
            None => debug!("No plot output configured, skipping render"),
        }

        Ok(hist)
    }

    /// Descriptive statistics of the age column.
    pub fn age_summary(&self) -> Result<AgeSummary, AnalysisError> {
        let df = self.loaded()?;
        let ages = StatsCalculator::column_values(df, &self.config.age_column)?;
        Ok(StatsCalculator::describe(&ages))
    }

    /// Return a copy of the table without the rows holding invalid emails.
    ///
    /// The stored table is left untouched.
    pub fn remove_rows_without_mail(&self) -> Result<DataFrame, AnalysisError> {
        let df = self.loaded()?;
        Ok(DataProcessor::remove_rows_without_mail(
            df,
            &self.config.email_column,
        )?)
    }

    /// Number of rows [`remove_rows_without_mail`](Self::remove_rows_without_mail) would drop.
    pub fn count_invalid_emails(&self) -> Result<usize, AnalysisError> {
        let df = self.loaded()?;
        Ok(DataProcessor::count_invalid_emails(
            df,
            &self.config.email_column,
        )?)
    }
}
