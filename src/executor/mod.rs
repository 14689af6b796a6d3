//! Run driver
//!
//! [`RunExecutor`] performs one run: `attempt_count` probes in strict
//! sequence, one sample per attempt, a pause between attempts, then the
//! chart. Each blocking probe is moved onto tokio's blocking pool and
//! awaited before the next one starts, so attempts never overlap.

use crate::{
    error::{AppError, Result},
    logging::ProbeLogger,
    models::{ProbeOutcome, RunConfiguration, SampleSequence},
    output::{render, LatencyChart, RunObserver},
    probe::Prober,
    stats::RunSummary,
};

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunResult {
    pub samples: SampleSequence,
    pub chart: LatencyChart,
}

impl RunResult {
    pub fn summary(&self) -> Result<RunSummary> {
        RunSummary::from_samples(&self.samples)
    }
}

/// Drives one probing run against the configured target
pub struct RunExecutor {
    config: RunConfiguration,
    prober: Prober,
    logger: ProbeLogger,
}

impl RunExecutor {
    pub fn new(config: RunConfiguration, prober: Prober, logger: ProbeLogger) -> Self {
        Self { config, prober, logger }
    }

    /// Executor using the system ping utility and a logger derived from `config`
    pub fn from_config(config: RunConfiguration) -> Self {
        let prober = Prober::from_config(&config);
        let logger = ProbeLogger::new(&config);
        Self::new(config, prober, logger)
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// Probe the target `attempt_count` times and return the samples.
    ///
    /// Failed attempts are recorded as the timeout boundary, so the result
    /// always holds exactly one entry per attempt.
    pub async fn collect(&self, observer: &mut dyn RunObserver) -> Result<SampleSequence> {
        let total = self.config.attempt_count;
        let mut samples = SampleSequence::with_capacity(total as usize);

        self.logger.log_run_start(&self.config, self.prober.parser_name()).await;
        observer.on_start(&self.config);

        for index in 1..=total {
            let outcome = self.attempt(index).await?;
            let recorded = samples.record(outcome, self.config.timeout_ms);

            self.logger.log_attempt(index, outcome, recorded).await;
            observer.on_attempt(index, total, &self.config.target, outcome);

            if index < total && !self.config.interval().is_zero() {
                tokio::time::sleep(self.config.interval()).await;
            }
        }

        Ok(samples)
    }

    /// Full run: collect samples, report completion, render and hand over the chart
    pub async fn run(&self, observer: &mut dyn RunObserver) -> Result<RunResult> {
        let samples = self.collect(observer).await?;

        if samples.len() != self.config.attempt_count as usize {
            return Err(AppError::internal(format!(
                "Run recorded {} samples for {} attempts",
                samples.len(),
                self.config.attempt_count
            )));
        }

        observer.on_complete(&samples);

        let chart = render(&samples)?;
        self.logger.log_run_summary(&RunSummary::from_samples(&samples)?).await;

        if let Err(e) = observer.show_chart(&chart) {
            self.logger.log_error(&e, Some("Failed to display chart")).await;
            return Err(e);
        }

        Ok(RunResult { samples, chart })
    }

    async fn attempt(&self, index: u32) -> Result<ProbeOutcome> {
        let prober = self.prober.clone();
        let target = self.config.target.clone();
        let timeout_ms = self.config.timeout_ms;

        let result = tokio::task::spawn_blocking(move || prober.attempt(&target, timeout_ms)).await?;

        Ok(match result {
            Ok(latency) => ProbeOutcome::Latency(latency),
            Err(e) => {
                self.logger.log_probe_failure(index, &e).await;
                ProbeOutcome::Timeout
            }
        })
    }
}
