//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::types::ParserKind;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `path` if present and return whether it was loaded.
    ///
    /// Variables already set in the process environment win over the file.
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;
        Ok(true)
    }

    /// Example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Ping Stability Tester Configuration
#
# Values here are used as defaults and can be overridden by
# command-line arguments.

# Host name or IP address to ping
# PING_TARGET=8.8.8.8

# Number of ping attempts per run
# PING_COUNT=4

# Per-attempt wait time in milliseconds (0-1000); timeouts are recorded as this value
# PING_TIMEOUT_MS=500

# Pause between attempts in seconds
# PING_INTERVAL_SECONDS=1

# Ping executable and output parser (auto, marker, iputils)
# PING_PROGRAM=ping
# PING_PARSER=auto

# Where the SVG chart is written
# CHART_PATH=ping-result.svg

# Enable colored output (true/false)
# ENABLE_COLOR=true

# A one-minute run against Cloudflare:
# PING_TARGET=one.one.one.one
# PING_COUNT=60
# PING_INTERVAL_SECONDS=1
"#
        .to_string()
    }

    /// Validate one variable's value before it is merged
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "PING_TARGET" => {
                crate::models::config::validate_target(value)
                    .map_err(|e| AppError::config(format!("Invalid PING_TARGET: {}", e.user_friendly_message())))?;
            }
            "PING_COUNT" => {
                let count: u32 = value
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > crate::defaults::MAX_ATTEMPT_COUNT {
                    return Err(AppError::config(format!(
                        "PING_COUNT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_ATTEMPT_COUNT,
                        count
                    )));
                }
            }
            "PING_TIMEOUT_MS" => {
                let timeout: u32 = value
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_TIMEOUT_MS value '{}': {}", value, e)))?;
                if timeout > crate::defaults::MAX_TIMEOUT_MS {
                    return Err(AppError::config(format!(
                        "PING_TIMEOUT_MS must be between 0 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_MS,
                        timeout
                    )));
                }
            }
            "PING_INTERVAL_SECONDS" => {
                let interval: u64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid PING_INTERVAL_SECONDS value '{}': {}", value, e))
                })?;
                if interval > crate::defaults::MAX_INTERVAL_SECONDS {
                    return Err(AppError::config(format!(
                        "PING_INTERVAL_SECONDS must be between 0 and {}, got: {}",
                        crate::defaults::MAX_INTERVAL_SECONDS,
                        interval
                    )));
                }
            }
            "PING_PROGRAM" | "CHART_PATH" => {
                if value.is_empty() {
                    return Err(AppError::config(format!("{} cannot be empty", key)));
                }
            }
            "PING_PARSER" => {
                value
                    .parse::<ParserKind>()
                    .map_err(|e| AppError::config(format!("Invalid PING_PARSER: {}", e.user_friendly_message())))?;
            }
            "ENABLE_COLOR" => {
                value
                    .parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Supported variables as (name, description, example)
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PING_TARGET", "Host name or IP address to ping", "one.one.one.one"),
            ("PING_COUNT", "Number of ping attempts (1-10000)", "10"),
            ("PING_TIMEOUT_MS", "Per-attempt wait time in milliseconds (0-1000)", "500"),
            ("PING_INTERVAL_SECONDS", "Pause between attempts in seconds", "1"),
            ("PING_PROGRAM", "Ping executable to invoke", "ping"),
            ("PING_PARSER", "Output parser: auto, marker or iputils", "auto"),
            ("CHART_PATH", "Where the SVG chart is written", "ping-result.svg"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Validate all currently set supported variables, one warning per bad value
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e.user_friendly_message()))
            })
            .collect()
    }

    /// Check a .env file's assignments without loading it
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut warnings = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = Self::validate_env_var(key.trim(), value) {
                    warnings.push(format!("Line '{}': {}", line, e.user_friendly_message()));
                }
            }
        }

        Ok(Some(warnings))
    }
}
