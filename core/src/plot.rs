//! Static scatter plot of clustered points.
//!
//! Rendered to a PNG file: x = harmed, y = property value, one palette
//! colour per cluster label.

use crate::{
    error::{AnalysisError, AnalysisResult},
    kmeans::Point,
};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub path:        PathBuf,
    pub width:       u32,
    pub height:      u32,
    /// Marker radius in pixels.
    pub marker_size: u32,
    /// Marker opacity in [0, 1].
    pub alpha:       f64,
    pub caption:     String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            path:        PathBuf::from("clusters.png"),
            width:       1024,
            height:      768,
            marker_size: 5,
            alpha:       0.5,
            caption:     "Monthly severity clusters".to_string(),
        }
    }
}

/// Draw `points` coloured by `labels` and write the image to `path`.
pub fn render_scatter(
    path: impl AsRef<Path>,
    points: &[Point],
    labels: &[usize],
    config: &PlotConfig,
) -> AnalysisResult<()> {
    let path = path.as_ref();
    if points.len() != labels.len() {
        return Err(AnalysisError::Plot(format!(
            "{} points but {} labels",
            points.len(),
            labels.len()
        )));
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let ((x_min, x_max), (y_min, y_max)) = axis_bounds(points);
    let mut chart = ChartBuilder::on(&root)
        .caption(&config.caption, ("sans-serif", 28))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .axis_desc_style(("sans-serif", 15))
        .x_desc("harmed")
        .y_desc("property_value")
        .draw()
        .map_err(plot_err)?;

    let alpha = config.alpha.clamp(0.0, 1.0);
    chart
        .draw_series(points.iter().zip(labels).map(|(p, &label)| {
            Circle::new(
                (p[0], p[1]),
                config.marker_size,
                Palette99::pick(label).mix(alpha).filled(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    log::info!("Scatter plot written to {}", path.display());
    Ok(())
}

/// Axis ranges covering every point with 5% padding on each side.
/// A zero-width span is widened so the chart never degenerates.
pub fn axis_bounds(points: &[Point]) -> ((f64, f64), (f64, f64)) {
    (
        padded_span(points.iter().map(|p| p[0])),
        padded_span(points.iter().map(|p| p[1])),
    )
}

fn padded_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.5
    };
    (lo - pad, hi + pad)
}

fn plot_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_both_axes() {
        let ((x0, x1), (y0, y1)) = axis_bounds(&[[0.0, 100.0], [10.0, 300.0]]);
        assert!((x0 + 0.5).abs() < 1e-9 && (x1 - 10.5).abs() < 1e-9);
        assert!((y0 - 90.0).abs() < 1e-9 && (y1 - 310.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_widened() {
        let ((x0, x1), (y0, y1)) = axis_bounds(&[[4.0, 0.0]]);
        assert!(x0 < 4.0 && x1 > 4.0);
        assert!(y0 < 0.0 && y1 > 0.0);
    }

    #[test]
    fn writes_a_png_file() {
        let path = std::env::temp_dir().join(format!("incident-scatter-{}.png", std::process::id()));
        let config = PlotConfig { width: 320, height: 240, ..PlotConfig::default() };
        let points = [[1.0, 10.0], [2.0, 20.0], [40.0, 900.0]];

        render_scatter(&path, &points, &[0, 0, 1], &config).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(bytes.starts_with(b"\x89PNG"), "not a PNG header");
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let path = std::env::temp_dir().join(format!("incident-scatter-mismatch-{}.png", std::process::id()));
        let err = render_scatter(&path, &[[1.0, 1.0], [2.0, 2.0]], &[0], &PlotConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Plot(_)), "got {err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn empty_input_gets_unit_range() {
        assert_eq!(axis_bounds(&[]), ((0.0, 1.0), (0.0, 1.0)));
    }
}
