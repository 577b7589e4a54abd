//! Questionnaire Analysis - JSON Data Cleaning & Age Distribution
//!
//! Loads questionnaire results, drops rows with malformed email addresses and
//! bins participant ages into a fixed-width histogram.

mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod stats;

pub use analysis::{AnalysisError, QuestionnaireAnalysis};
pub use config::AnalysisConfig;
