//! Questionnaire Report
//! Loads one questionnaire file and logs the age distribution and email cleanup.
//!
//! Usage: questionnaire-report <data.json> [config.json]

use anyhow::{bail, Context, Result};
use log::info;
use questionnaire_analysis::{AnalysisConfig, QuestionnaireAnalysis};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next().map(PathBuf::from) else {
        bail!("usage: questionnaire-report <data.json> [config.json]");
    };

    let config = match args.next() {
        Some(path) => AnalysisConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading config {}", path))?,
        None => AnalysisConfig::default(),
    };

    let mut analysis = QuestionnaireAnalysis::new(&data_path)
        .with_context(|| format!("opening {}", data_path.display()))?
        .with_config(config);
    analysis.read_data().context("reading questionnaire data")?;

    let hist = analysis.show_age_distrib().context("binning ages")?;
    for (lower, upper, count) in hist.bins() {
        info!("age {:>5.0} - {:<5.0} {}", lower, upper, count);
    }

    let summary = analysis.age_summary().context("summarizing ages")?;
    info!(
        "ages: n={} mean={:.2} median={:.2} std={:.2} min={:.0} max={:.0}",
        summary.count, summary.mean, summary.median, summary.std, summary.min, summary.max
    );

    let cleaned = analysis
        .remove_rows_without_mail()
        .context("filtering invalid emails")?;
    info!(
        "{} of {} rows have a valid email",
        cleaned.height(),
        analysis.data().map(|df| df.height()).unwrap_or(0)
    );

    Ok(())
}
