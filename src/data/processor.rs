//! Data Processor Module
//! Handles email validation and removal of rows with invalid addresses.

use log::{debug, info};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Row {row} has no string email value")]
    NonStringEmail { row: usize },
}

/// Check an email address against the five structural rules.
///
/// Returns `true` when the address is invalid. Only the first character is
/// checked for a leading `@` or `.`; a trailing `@` or `.` is accepted.
pub fn is_invalid_email(email: &str) -> bool {
    if !email.contains('@') || !email.contains('.') {
        return true;
    }

    if email.starts_with(['@', '.']) {
        return true;
    }

    let mut at_positions = email.match_indices('@').map(|(i, _)| i);
    let Some(at) = at_positions.next() else {
        return true;
    };
    if at_positions.next().is_some() {
        return true;
    }

    // '@' is one byte, so the next char starts right after it
    match email[at + 1..].chars().next() {
        Some('.') | None => true,
        Some(_) => false,
    }
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Build the keep-mask for `email_col`: `true` for rows with a valid email.
    pub fn valid_email_mask(
        df: &DataFrame,
        email_col: &str,
    ) -> Result<BooleanChunked, ProcessorError> {
        let emails = df.column(email_col)?.as_materialized_series().str()?;

        let mut keep: Vec<bool> = Vec::with_capacity(emails.len());
        for (row, email) in emails.into_iter().enumerate() {
            let email = email.ok_or(ProcessorError::NonStringEmail { row })?;
            let invalid = is_invalid_email(email);
            if invalid {
                debug!("Row {}: rejecting email {:?}", row, email);
            }
            keep.push(!invalid);
        }

        Ok(BooleanChunked::new("keep".into(), &keep))
    }

    /// Return a new DataFrame with the rows holding invalid emails removed.
    ///
    /// Surviving rows keep their relative order and are numbered from 0.
    pub fn remove_rows_without_mail(
        df: &DataFrame,
        email_col: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let mask = Self::valid_email_mask(df, email_col)?;
        let cleaned = df.filter(&mask)?;

        info!(
            "Removed {} of {} rows with invalid emails",
            df.height() - cleaned.height(),
            df.height()
        );
        Ok(cleaned)
    }

    /// Count the rows the email filter would drop.
    pub fn count_invalid_emails(df: &DataFrame, email_col: &str) -> Result<usize, ProcessorError> {
        let mask = Self::valid_email_mask(df, email_col)?;
        Ok(mask.into_iter().filter(|keep| *keep == Some(false)).count())
    }
}
