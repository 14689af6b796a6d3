//! Output and display system
//!
//! The executor reports progress through the [`RunObserver`] trait and never
//! prints on its own. [`ConsoleReporter`] is the terminal implementation;
//! tests substitute recording observers.

pub mod chart;
mod console;

pub use chart::{render, LatencyChart, MarkerStyle, MARKER_THRESHOLD};
pub use console::ConsoleReporter;

use crate::{
    error::Result,
    models::{ProbeOutcome, RunConfiguration, SampleSequence},
    stats::RunSummary,
};
use serde::{Deserialize, Serialize};

/// Display surface for one run
pub trait RunObserver: Send {
    /// Called once before the first attempt
    fn on_start(&mut self, _config: &RunConfiguration) {}

    /// Called after every attempt with its 1-based index
    fn on_attempt(&mut self, index: u32, total: u32, target: &str, outcome: ProbeOutcome);

    /// Called once after the last attempt
    fn on_complete(&mut self, samples: &SampleSequence);

    /// Hand over the finished chart for display or persistence
    fn show_chart(&mut self, chart: &LatencyChart) -> Result<()>;
}

/// Machine-readable account of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub target: String,
    pub attempt_count: u32,
    pub timeout_ms: u32,
    pub samples: Vec<u32>,
    pub timeouts: usize,
    pub mean_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_path: Option<String>,
}

impl RunReport {
    pub fn new(config: &RunConfiguration, samples: &SampleSequence) -> Result<Self> {
        let summary = RunSummary::from_samples(samples)?;
        Ok(Self {
            target: config.target.clone(),
            attempt_count: config.attempt_count,
            timeout_ms: config.timeout_ms,
            samples: samples.as_slice().to_vec(),
            timeouts: summary.timeouts,
            mean_ms: summary.mean_ms,
            chart_path: None,
        })
    }

    pub fn with_chart_path<S: Into<String>>(mut self, path: S) -> Self {
        self.chart_path = Some(path.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_report_from_samples() {
        let config = RunConfiguration::for_target("8.8.8.8");
        let mut samples = SampleSequence::new();
        samples.record(ProbeOutcome::Latency(0), 500);
        samples.record(ProbeOutcome::Timeout, 500);
        samples.record(ProbeOutcome::Latency(10), 500);

        let report = RunReport::new(&config, &samples).unwrap().with_chart_path("out.svg");
        assert_eq!(report.samples, vec![0, 500, 10]);
        assert_eq!(report.timeouts, 1);
        assert_eq!(report.mean_ms, 170.0);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["target"], "8.8.8.8");
        assert_eq!(json["chart_path"], "out.svg");
        assert_eq!(json["samples"], serde_json::json!([0, 500, 10]));
    }

    #[test]
    fn test_run_report_requires_samples() {
        let config = RunConfiguration::default();
        assert!(RunReport::new(&config, &SampleSequence::new()).is_err());
    }
}
