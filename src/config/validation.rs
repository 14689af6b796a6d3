//! Configuration validation beyond the hard limits
//!
//! [`RunConfiguration::validate`] rejects values a run cannot use. The checks
//! here look for settings that work but probably surprise the operator.

use crate::{
    error::{AppError, Result},
    models::RunConfiguration,
    output::MARKER_THRESHOLD,
    probe::PingFlavor,
};
use colored::*;
use std::net::IpAddr;
use std::path::Path;

/// Runs expected to take longer than this get a warning
const LONG_RUN_SECONDS: u64 = 60 * 60;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Hard validation followed by advisory checks
    pub fn validate_comprehensive(config: &RunConfiguration) -> Result<Vec<ValidationWarning>> {
        config.validate()?;
        Self::validate_chart_path(&config.chart_path)?;

        let mut warnings = Vec::new();
        warnings.extend(Self::check_target(config));
        warnings.extend(Self::check_timing(config, PingFlavor::current()));
        warnings.extend(Self::check_chart(config));
        Ok(warnings)
    }

    /// The chart is written after the last attempt, so a bad directory is
    /// caught before probing starts.
    fn validate_chart_path(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(AppError::config(format!(
                    "Chart directory '{}' does not exist",
                    parent.display()
                )));
            }
        }
        if path.is_dir() {
            return Err(AppError::config(format!(
                "Chart path '{}' is a directory",
                path.display()
            )));
        }
        Ok(())
    }

    fn check_target(config: &RunConfiguration) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if !config.is_candidate_target() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Target '{}' is not one of the built-in targets", config.target),
            ));
        }

        if let Ok(ip) = config.target.parse::<IpAddr>() {
            let local = match ip {
                IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
                IpAddr::V6(v6) => v6.is_loopback(),
            };
            if local {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Target '{}' is on a local network; latency will not reflect internet paths", ip),
                ));
            }
        }

        warnings
    }

    fn check_timing(config: &RunConfiguration, flavor: PingFlavor) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.timeout_ms == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Timeout is 0ms; most attempts will be recorded as timeouts with value 0".to_string(),
            ));
        } else if flavor == PingFlavor::Iputils && config.timeout_ms % 1000 != 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "This ping waits in whole seconds; {}ms is rounded up to {}s",
                    config.timeout_ms,
                    crate::probe::platform::iputils_wait_seconds(config.timeout_ms)
                ),
            ));
        }

        let expected_seconds = u64::from(config.attempt_count.saturating_sub(1)) * config.interval_seconds;
        if expected_seconds > LONG_RUN_SECONDS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Run will take at least {} minutes ({} attempts, {}s apart)",
                    expected_seconds / 60,
                    config.attempt_count,
                    config.interval_seconds
                ),
            ));
        }

        warnings
    }

    fn check_chart(config: &RunConfiguration) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let is_svg = config
            .chart_path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        if !is_svg {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Chart is written as SVG but '{}' has no .svg extension", config.chart_path.display()),
            ));
        }

        if config.attempt_count as usize > MARKER_THRESHOLD {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Runs over {} attempts are drawn without point markers",
                    MARKER_THRESHOLD
                ),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Advisory finding about a configuration
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &RunConfiguration) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
