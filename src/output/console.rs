//! Terminal reporter with optional color
//!
//! Status lines are colored by how fast the reply was; timeouts are red.
//! In JSON mode progress goes to stderr so stdout carries only the report.

use super::{LatencyChart, RunObserver, RunReport};
use crate::{
    error::Result,
    models::{ProbeOutcome, RunConfiguration, SampleSequence},
    stats::{format_mean, RunSummary},
    types::LatencyLevel,
};
use colored::*;
use std::path::PathBuf;

/// Console implementation of [`RunObserver`]
pub struct ConsoleReporter {
    use_color: bool,
    verbose: bool,
    json: bool,
    chart_path: PathBuf,
    report: Option<RunReport>,
    config: RunConfiguration,
}

impl ConsoleReporter {
    pub fn new(config: &RunConfiguration) -> Self {
        Self {
            use_color: config.enable_color,
            verbose: config.verbose,
            json: config.json,
            chart_path: config.chart_path.clone(),
            report: None,
            config: config.clone(),
        }
    }

    /// Status line for one attempt, e.g. `[2/4] reply from 8.8.8.8: time=23ms`
    pub fn format_attempt(&self, index: u32, total: u32, target: &str, outcome: ProbeOutcome) -> String {
        let progress = format!("[{}/{}]", index, total);
        let status = outcome.status_line(target);

        if !self.use_color {
            return format!("{} {}", progress, status);
        }

        let level = LatencyLevel::from_latency(outcome.latency_ms());
        let colored_status = status.color(level_color(level));
        format!("{} {}", progress.bright_black(), colored_status)
    }

    /// Completion notice plus the one-line summary
    pub fn format_completion(&self, summary: &RunSummary) -> String {
        let headline = "probing complete";
        let detail = format!(
            "average latency: {}ms over {} attempts ({} timed out)",
            format_mean(summary.mean_ms),
            summary.attempts,
            summary.timeouts
        );

        if self.use_color {
            format!("{}\n{}", headline.green().bold(), detail)
        } else {
            format!("{}\n{}", headline, detail)
        }
    }

    /// Notice printed after the chart is written
    pub fn format_chart_saved(&self) -> String {
        let message = format!("chart saved to {}", self.chart_path.display());
        if self.use_color {
            message.cyan().to_string()
        } else {
            message
        }
    }

    fn format_start(&self, config: &RunConfiguration) -> String {
        let mut header = format!(
            "pinging {} {} times (timeout {}ms, interval {}s)",
            config.target, config.attempt_count, config.timeout_ms, config.interval_seconds
        );
        if self.use_color {
            header = header.bright_cyan().bold().to_string();
        }
        header
    }
}

fn level_color(level: LatencyLevel) -> Color {
    match level {
        LatencyLevel::Excellent => Color::Green,
        LatencyLevel::Good => Color::Cyan,
        LatencyLevel::Fair => Color::Yellow,
        LatencyLevel::Poor => Color::Magenta,
        LatencyLevel::Timeout => Color::Red,
    }
}

impl RunObserver for ConsoleReporter {
    fn on_start(&mut self, config: &RunConfiguration) {
        if self.json {
            return;
        }
        println!("{}", self.format_start(config));
        if self.verbose {
            println!("  ping program: {}", config.ping_program);
            println!("  parser: {}", config.parser);
            println!("  chart: {}", config.chart_path.display());
        }
    }

    fn on_attempt(&mut self, index: u32, total: u32, target: &str, outcome: ProbeOutcome) {
        let line = self.format_attempt(index, total, target, outcome);
        if self.json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn on_complete(&mut self, samples: &SampleSequence) {
        match RunSummary::from_samples(samples) {
            Ok(summary) => {
                if !self.json {
                    println!();
                    println!("{}", self.format_completion(&summary));
                }
            }
            Err(_) => {
                if !self.json {
                    println!("probing complete");
                }
            }
        }
        self.report = RunReport::new(&self.config, samples).ok();
    }

    fn show_chart(&mut self, chart: &LatencyChart) -> Result<()> {
        chart.save_svg(&self.chart_path)?;

        if self.json {
            if let Some(report) = self.report.take() {
                let report = report.with_chart_path(self.chart_path.display().to_string());
                println!("{}", report.to_json()?);
            }
        } else {
            println!("{}", self.format_chart_saved());
        }

        Ok(())
    }
}
