//! Static Chart Renderer
//! Draws the age histogram to a PNG file with the plotters bitmap backend.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. One bar per bin, x-axis spanning the bin edges
//! 3. Y-axis from 0 to the largest count (at least 1)

use crate::config::PlotConfig;
use crate::stats::AgeHistogram;
use log::info;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Bar fill (RGB)
const BAR_FILL: RGBColor = RGBColor(91, 155, 213);
const BAR_EDGE: RGBColor = RGBColor(0, 0, 0);

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),
    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),
    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `hist` as a bar chart and save it to `output`.
    pub fn render_histogram(
        hist: &AgeHistogram,
        settings: &PlotConfig,
        output: &Path,
    ) -> Result<(), PlotError> {
        if hist.counts.is_empty() || hist.edges.len() != hist.counts.len() + 1 {
            return Err(PlotError::InvalidData(format!(
                "{} counts do not match {} edges",
                hist.counts.len(),
                hist.edges.len()
            )));
        }
        if settings.width == 0 || settings.height == 0 {
            return Err(PlotError::InvalidData(format!(
                "image size {}x{} is empty",
                settings.width, settings.height
            )));
        }

        let x_min = hist.edges[0];
        let x_max = hist.edges[hist.edges.len() - 1];
        let y_max = hist.counts.iter().copied().max().unwrap_or(0).max(1);

        let root = BitMapBackend::new(output, (settings.width, settings.height));
        let drawing_area = root.into_drawing_area();
        drawing_area
            .fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&drawing_area)
            .caption(&settings.title, ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, 0u64..y_max + y_max / 10 + 1)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Age")
            .y_desc("Participants")
            .x_labels(hist.edges.len())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(hist.bins().map(|(lower, upper, count)| {
                Rectangle::new([(lower, 0u64), (upper, count)], BAR_FILL.filled())
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(hist.bins().map(|(lower, upper, count)| {
                Rectangle::new([(lower, 0u64), (upper, count)], BAR_EDGE.stroke_width(1))
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        drawing_area
            .present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        info!("Saved age histogram to {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PlotConfig {
        PlotConfig {
            output: None,
            width: 400,
            height: 300,
            title: "Ages".to_string(),
        }
    }

    #[test]
    fn mismatched_edges_are_rejected() {
        let hist = AgeHistogram {
            counts: vec![1, 2],
            edges: vec![0.0, 10.0],
        };
        let dir = tempfile::tempdir().unwrap();

        let err = StaticChartRenderer::render_histogram(&hist, &settings(), &dir.path().join("h.png"))
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn empty_image_is_rejected() {
        let hist = AgeHistogram {
            counts: vec![1],
            edges: vec![0.0, 10.0],
        };
        let mut settings = settings();
        settings.height = 0;
        let dir = tempfile::tempdir().unwrap();

        let err = StaticChartRenderer::render_histogram(&hist, &settings, &dir.path().join("h.png"))
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn writes_png() {
        let hist = AgeHistogram {
            counts: vec![1, 0, 3],
            edges: vec![0.0, 10.0, 20.0, 30.0],
        };
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("hist.png");

        StaticChartRenderer::render_histogram(&hist, &settings(), &output).unwrap();
        assert!(output.metadata().unwrap().len() > 0);
    }
}
