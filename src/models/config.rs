//! Run configuration data model and validation

use crate::types::{AppError, ParserKind, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration of one probing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    /// Host name or IP address to ping
    #[serde(default = "default_target")]
    pub target: String,

    /// Number of probe attempts in the run
    #[serde(default = "default_attempt_count")]
    pub attempt_count: u32,

    /// Wait time per probe in milliseconds; also the value recorded for timeouts
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Pause between attempts in seconds
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Ping executable to invoke
    #[serde(default = "default_ping_program")]
    pub ping_program: String,

    /// Output parsing strategy
    #[serde(default)]
    pub parser: ParserKind,

    /// Where the SVG chart is written
    #[serde(default = "default_chart_path")]
    pub chart_path: PathBuf,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Print the run report as JSON
    #[serde(default)]
    pub json: bool,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            target: default_target(),
            attempt_count: default_attempt_count(),
            timeout_ms: default_timeout_ms(),
            interval_seconds: default_interval_seconds(),
            ping_program: default_ping_program(),
            parser: ParserKind::default(),
            chart_path: default_chart_path(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            json: false,
        }
    }
}

impl RunConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a target with default settings
    pub fn for_target<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Get the inter-attempt delay as Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Whether the target is one of the built-in candidates
    pub fn is_candidate_target(&self) -> bool {
        crate::defaults::CANDIDATE_TARGETS.contains(&self.target.as_str())
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        validate_target(&self.target)?;

        if self.attempt_count == 0 {
            return Err(AppError::config("Attempt count must be greater than 0"));
        }

        if self.attempt_count > crate::defaults::MAX_ATTEMPT_COUNT {
            return Err(AppError::config(format!(
                "Attempt count cannot exceed {}",
                crate::defaults::MAX_ATTEMPT_COUNT
            )));
        }

        if self.timeout_ms > crate::defaults::MAX_TIMEOUT_MS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {}ms",
                crate::defaults::MAX_TIMEOUT_MS
            )));
        }

        if self.interval_seconds > crate::defaults::MAX_INTERVAL_SECONDS {
            return Err(AppError::config(format!(
                "Interval cannot exceed {} seconds",
                crate::defaults::MAX_INTERVAL_SECONDS
            )));
        }

        if self.ping_program.trim().is_empty() {
            return Err(AppError::config("Ping program cannot be empty"));
        }

        if self.chart_path.as_os_str().is_empty() {
            return Err(AppError::config("Chart output path cannot be empty"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(target) = std::env::var("PING_TARGET") {
            let target = target.trim();
            if !target.is_empty() {
                self.target = target.to_string();
            }
        }

        if let Ok(count) = std::env::var("PING_COUNT") {
            self.attempt_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(timeout) = std::env::var("PING_TIMEOUT_MS") {
            self.timeout_ms = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_TIMEOUT_MS value '{}': {}", timeout, e)))?;
        }

        if let Ok(interval) = std::env::var("PING_INTERVAL_SECONDS") {
            self.interval_seconds = interval.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_INTERVAL_SECONDS value '{}': {}", interval, e)))?;
        }

        if let Ok(program) = std::env::var("PING_PROGRAM") {
            if !program.trim().is_empty() {
                self.ping_program = program.trim().to_string();
            }
        }

        if let Ok(parser) = std::env::var("PING_PARSER") {
            self.parser = parser.parse()
                .map_err(|e| AppError::config(format!("Invalid PING_PARSER value '{}': {}", parser, e)))?;
        }

        if let Ok(path) = std::env::var("CHART_PATH") {
            if !path.trim().is_empty() {
                self.chart_path = PathBuf::from(path.trim());
            }
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Check that a target is a usable host name or IP address.
///
/// Targets are passed to the ping utility as an argument, so anything that
/// could be read as a flag is rejected.
pub fn validate_target(target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(AppError::config("Target cannot be empty"));
    }

    if target.starts_with('-') {
        return Err(AppError::config(format!("Invalid target '{}': must not start with '-'", target)));
    }

    if target.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    match url::Host::parse(target) {
        Ok(url::Host::Domain(_)) | Ok(url::Host::Ipv4(_)) | Ok(url::Host::Ipv6(_)) => Ok(()),
        Err(e) => Err(AppError::config(format!("Invalid target '{}': {}", target, e))),
    }
}

// Default value functions for serde
fn default_target() -> String {
    crate::defaults::DEFAULT_TARGET.to_string()
}

fn default_attempt_count() -> u32 {
    crate::defaults::DEFAULT_ATTEMPT_COUNT
}

fn default_timeout_ms() -> u32 {
    crate::defaults::DEFAULT_TIMEOUT_MS
}

fn default_interval_seconds() -> u64 {
    crate::defaults::DEFAULT_INTERVAL.as_secs()
}

fn default_ping_program() -> String {
    crate::defaults::DEFAULT_PING_PROGRAM.to_string()
}

fn default_chart_path() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_CHART_PATH)
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
