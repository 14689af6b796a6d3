//! Summary statistic and chart range for a run's latency samples

use crate::{
    error::{AppError, Result},
    models::SampleSequence,
};
use serde::{Deserialize, Serialize};

/// Relative padding applied around the sample range on the y axis
pub const Y_PADDING_RATIO: f64 = 0.05;

/// Arithmetic mean of the samples.
///
/// An empty sequence has no mean; reaching this with one means the driver
/// recorded no attempts.
pub fn mean(samples: &SampleSequence) -> Result<f64> {
    if samples.is_empty() {
        return Err(AppError::EmptySampleSequence);
    }
    Ok(samples.sum() as f64 / samples.len() as f64)
}

/// Y axis range: `min - max * 0.05` up to `max * 1.05`.
///
/// The lower bound goes negative when the minimum is small relative to the
/// maximum; that matches how the chart has always been framed.
pub fn y_bounds(samples: &SampleSequence) -> Result<(f64, f64)> {
    let (min, max) = match (samples.min(), samples.max()) {
        (Some(min), Some(max)) => (f64::from(min), f64::from(max)),
        _ => return Err(AppError::EmptySampleSequence),
    };
    Ok((min - max * Y_PADDING_RATIO, max * (1.0 + Y_PADDING_RATIO)))
}

/// Figures reported at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub attempts: usize,
    pub timeouts: usize,
    pub mean_ms: f64,
}

impl RunSummary {
    pub fn from_samples(samples: &SampleSequence) -> Result<Self> {
        Ok(Self {
            attempts: samples.len(),
            timeouts: samples.timeout_count(),
            mean_ms: mean(samples)?,
        })
    }

    /// Mean formatted the way the chart legend shows it
    pub fn mean_label(&self) -> String {
        format_mean(self.mean_ms)
    }
}

/// Two-decimal rendering used for every displayed mean
pub fn format_mean(mean_ms: f64) -> String {
    format!("{:.2}", mean_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeOutcome;
    use proptest::prelude::*;

    #[test]
    fn test_mean_of_identical_samples() {
        let samples = SampleSequence::from_latencies(vec![23, 23, 23, 23]);
        assert_eq!(mean(&samples).unwrap(), 23.0);
    }

    #[test]
    fn test_mean_includes_substituted_timeouts() {
        let mut samples = SampleSequence::new();
        samples.record(ProbeOutcome::Latency(0), 500);
        samples.record(ProbeOutcome::Timeout, 500);
        samples.record(ProbeOutcome::Latency(10), 500);

        assert_eq!(mean(&samples).unwrap(), 170.0);
        assert_eq!(format_mean(mean(&samples).unwrap()), "170.00");
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let samples = SampleSequence::new();
        assert!(matches!(mean(&samples), Err(AppError::EmptySampleSequence)));
        assert!(matches!(y_bounds(&samples), Err(AppError::EmptySampleSequence)));
        assert!(RunSummary::from_samples(&samples).is_err());
    }

    #[test]
    fn test_y_bounds_padding() {
        let samples = SampleSequence::from_latencies(vec![0, 500, 10]);
        let (lower, upper) = y_bounds(&samples).unwrap();
        assert!((lower + 25.0).abs() < 1e-9);
        assert!((upper - 525.0).abs() < 1e-9);

        let samples = SampleSequence::from_latencies(vec![100, 200]);
        let (lower, upper) = y_bounds(&samples).unwrap();
        assert!((lower - 90.0).abs() < 1e-9);
        assert!((upper - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_summary() {
        let mut samples = SampleSequence::new();
        samples.record(ProbeOutcome::Latency(1), 500);
        samples.record(ProbeOutcome::Latency(2), 500);
        let summary = RunSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.timeouts, 0);
        assert_eq!(summary.mean_label(), "1.50");
    }

    proptest! {
        #[test]
        fn prop_mean_is_sum_over_len(values in prop::collection::vec(0u32..=10_000, 1..200)) {
            let expected = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
            let samples = SampleSequence::from_latencies(values);
            let actual = mean(&samples).unwrap();
            prop_assert!((actual - expected).abs() < 1e-9);
            prop_assert_eq!(format_mean(actual), format!("{:.2}", expected));
        }

        #[test]
        fn prop_bounds_contain_samples(values in prop::collection::vec(0u32..=1000, 1..100)) {
            let samples = SampleSequence::from_latencies(values);
            let (lower, upper) = y_bounds(&samples).unwrap();
            for v in samples.iter() {
                prop_assert!(lower <= f64::from(v));
                prop_assert!(f64::from(v) <= upper);
            }
        }
    }
}
