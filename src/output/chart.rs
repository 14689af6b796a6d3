//! Latency line chart with an average reference line
//!
//! [`render`] turns a finished run's samples into a [`LatencyChart`], which
//! holds everything needed to draw it. Drawing goes through plotters' SVG
//! backend so no system fonts or image codecs are required.

use crate::{
    error::{AppError, Result},
    models::SampleSequence,
    stats,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Runs with at most this many attempts get a marker on every point
pub const MARKER_THRESHOLD: usize = 30;

/// Canvas size in pixels
pub const CHART_SIZE: (u32, u32) = (1600, 800);

pub const CHART_TITLE: &str = "Ping result";
pub const X_AXIS_LABEL: &str = "Attempt index";
pub const Y_AXIS_LABEL: &str = "Latency (ms)";
pub const SERIES_LABEL: &str = "Ping";

/// How the latency series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Line plus a circle marker per attempt
    Points,
    /// Plain line
    Line,
}

impl MarkerStyle {
    /// Style for a run of `len` samples
    pub fn for_len(len: usize) -> Self {
        if len <= MARKER_THRESHOLD {
            Self::Points
        } else {
            Self::Line
        }
    }
}

/// A rendered run, ready to be drawn or inspected
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyChart {
    samples: Vec<u32>,
    mean: f64,
    y_bounds: (f64, f64),
    marker_style: MarkerStyle,
}

/// Build the chart for a finished run.
///
/// Fails with [`AppError::EmptySampleSequence`] when there are no samples.
pub fn render(samples: &SampleSequence) -> Result<LatencyChart> {
    let mean = stats::mean(samples)?;
    let y_bounds = stats::y_bounds(samples)?;

    Ok(LatencyChart {
        samples: samples.as_slice().to_vec(),
        mean,
        y_bounds,
        marker_style: MarkerStyle::for_len(samples.len()),
    })
}

impl LatencyChart {
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Legend text of the average line, e.g. `average=170.00`
    pub fn average_label(&self) -> String {
        format!("average={}", stats::format_mean(self.mean))
    }

    /// Y axis range as framed for the chart
    pub fn y_bounds(&self) -> (f64, f64) {
        self.y_bounds
    }

    pub fn marker_style(&self) -> MarkerStyle {
        self.marker_style
    }

    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// Points as (attempt index starting at 1, latency)
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| ((i + 1) as f64, f64::from(v)))
    }

    /// Draw the chart as an SVG document
    pub fn to_svg(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            self.draw(&root)?;
        }
        Ok(svg)
    }

    /// Draw the chart and write it to `path`
    pub fn save_svg(&self, path: &Path) -> Result<()> {
        let svg = self.to_svg()?;
        std::fs::write(path, svg)
            .map_err(|e| AppError::io(format!("Failed to write chart to {}: {}", path.display(), e)))
    }

    /// X range covering every attempt; a single attempt gets room on both sides
    fn x_range(&self) -> (f64, f64) {
        let len = self.samples.len() as f64;
        if self.samples.len() > 1 {
            (1.0, len)
        } else {
            (0.0, 2.0)
        }
    }

    /// The plotting backend cannot map an empty range, so flat all-zero runs
    /// are widened here without touching the reported bounds.
    fn drawable_y_range(&self) -> (f64, f64) {
        let (low, high) = self.y_bounds;
        if high - low > f64::EPSILON {
            (low, high)
        } else {
            (low - 1.0, high + 1.0)
        }
    }

    fn draw(&self, root: &DrawingArea<SVGBackend<'_>, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;

        let (x_start, x_end) = self.x_range();
        let (y_low, y_high) = self.drawable_y_range();

        let mut chart = ChartBuilder::on(root)
            .caption(CHART_TITLE, ("sans-serif", 36))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_start..x_end, y_low..y_high)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_label_formatter(&|x| {
                if x.fract() == 0.0 {
                    format!("{:.0}", x)
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()
            .map_err(render_error)?;

        let points: Vec<(f64, f64)> = self.points().collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(render_error)?
            .label(SERIES_LABEL)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        if self.marker_style == MarkerStyle::Points {
            chart
                .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))
                .map_err(render_error)?;
        }

        chart
            .draw_series(LineSeries::new(
                vec![(x_start, self.mean), (x_end, self.mean)],
                RED.stroke_width(2),
            ))
            .map_err(render_error)?
            .label(self.average_label())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }
}

fn render_error<E: std::fmt::Display>(error: E) -> AppError {
    AppError::render(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeOutcome;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn samples(values: &[u32]) -> SampleSequence {
        SampleSequence::from_latencies(values.to_vec())
    }

    #[test]
    fn test_render_identical_samples() {
        let chart = render(&samples(&[23, 23, 23, 23])).unwrap();
        assert_eq!(chart.mean(), 23.0);
        assert_eq!(chart.average_label(), "average=23.00");
        assert_eq!(chart.marker_style(), MarkerStyle::Points);
    }

    #[test]
    fn test_render_mixed_run() {
        let mut run = SampleSequence::new();
        run.record(ProbeOutcome::Latency(0), 500);
        run.record(ProbeOutcome::Timeout, 500);
        run.record(ProbeOutcome::Latency(10), 500);

        let chart = render(&run).unwrap();
        assert_eq!(chart.samples(), &[0, 500, 10]);
        assert_eq!(chart.average_label(), "average=170.00");
    }

    #[test]
    fn test_render_rejects_empty() {
        let err = render(&SampleSequence::new()).unwrap_err();
        assert!(matches!(err, AppError::EmptySampleSequence));
    }

    #[test]
    fn test_marker_threshold() {
        assert_eq!(render(&samples(&[5])).unwrap().marker_style(), MarkerStyle::Points);
        assert_eq!(render(&samples(&[5; 30])).unwrap().marker_style(), MarkerStyle::Points);
        assert_eq!(render(&samples(&[5; 31])).unwrap().marker_style(), MarkerStyle::Line);
    }

    #[test]
    fn test_render_is_idempotent() {
        let run = samples(&[12, 40, 7, 33]);
        let first = render(&run).unwrap();
        let second = render(&run).unwrap();
        assert_eq!(first.mean(), second.mean());
        assert_eq!(first.y_bounds(), second.y_bounds());
        assert_eq!(first, second);
    }

    #[test]
    fn test_points_start_at_one() {
        let chart = render(&samples(&[3, 4])).unwrap();
        let points: Vec<_> = chart.points().collect();
        assert_eq!(points, vec![(1.0, 3.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_svg_contains_labels() {
        let svg = render(&samples(&[23, 23, 23, 23])).unwrap().to_svg().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains("average=23.00"));
        assert!(svg.contains(SERIES_LABEL));
    }

    #[test]
    fn test_svg_markers_follow_style() {
        let marked = render(&samples(&[1, 2, 3])).unwrap().to_svg().unwrap();
        assert!(marked.contains("<circle"));

        let unmarked = render(&samples(&[7; 31])).unwrap().to_svg().unwrap();
        assert!(!unmarked.contains("<circle"));
    }

    #[test]
    fn test_all_zero_run_still_draws() {
        let chart = render(&samples(&[0, 0, 0])).unwrap();
        assert_eq!(chart.y_bounds(), (0.0, 0.0));
        assert!(chart.to_svg().is_ok());
    }

    #[test]
    fn test_single_attempt_draws() {
        let chart = render(&samples(&[42])).unwrap();
        assert!(chart.to_svg().unwrap().contains("average=42.00"));
    }

    #[test]
    fn test_save_svg_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        render(&samples(&[10, 20])).unwrap().save_svg(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("average=15.00"));
    }

    #[test]
    fn test_save_svg_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let err = render(&samples(&[10])).unwrap().save_svg(&path).unwrap_err();
        assert_eq!(err.category(), "IO");
    }

    proptest! {
        #[test]
        fn prop_render_labels_mean_and_repeats(values in prop::collection::vec(0u32..=1000, 1..100)) {
            let expected = values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64;
            let run = samples(&values);

            let first = render(&run).unwrap();
            prop_assert!((first.mean() - expected).abs() < 1e-9);
            prop_assert_eq!(first.average_label(), format!("average={:.2}", first.mean()));

            let second = render(&run).unwrap();
            prop_assert_eq!(second.mean(), first.mean());
            prop_assert_eq!(second.y_bounds(), first.y_bounds());
            prop_assert_eq!(second.average_label(), first.average_label());
        }
    }
}
