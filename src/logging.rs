//! Structured logging for ping runs
//!
//! This module provides:
//! - Leveled log entries with structured fields and correlation IDs
//! - Console and JSON output formats
//! - A probe logger for per-attempt events and run summaries
//! - A factory that stamps every logger with the same session ID

use crate::error::{AppError, Result};
use crate::models::{ProbeOutcome, RunConfiguration};
use crate::probe::ProbeError;
use crate::stats::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - per-attempt detail
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - an attempt failed but the run continues
    Warn = 2,
    /// Error level - the run cannot complete
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
        }
    }

    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// One structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON lines for log aggregators
    Json,
}

#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger with level filtering and pluggable formats
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    /// Keep stdout free for machine-readable reports
    stderr_only: bool,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            format: LogFormat::Console,
            stderr_only: false,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Logger whose level and format follow the run's verbosity flags.
    ///
    /// Quiet runs only show warnings, which is where failed ping
    /// invocations are reported.
    pub fn with_config(name: String, config: &RunConfiguration) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            stderr_only: config.json,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Add a field attached to every subsequent entry
    pub async fn add_context_field<T: Serialize>(&self, key: String, value: T) {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut context = self.context.write().await;
            context.context_fields.insert(key, json_value);
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry
                .fields
                .insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }
        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = self.format_entry(&entry);

        if self.stderr_only || entry.level >= LogLevel::Warn {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}", timestamp, formatted_level, entry.logger, entry.message);

        if let Some(correlation_id) = &entry.correlation_id {
            let short: String = correlation_id.chars().take(8).collect();
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!(
                "{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}",
                entry.message
            ),
        }
    }
}

/// Builder for a single log entry
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
            .field("error_exit_code", error.exit_code())
    }

    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger for probe attempts and run-level events
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn new(config: &RunConfiguration) -> Self {
        Self {
            logger: Logger::with_config("PING".to_string(), config),
        }
    }

    fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub async fn log_run_start(&self, config: &RunConfiguration, parser: &str) {
        self.logger
            .info(&format!("Starting {} probes of {}", config.attempt_count, config.target))
            .field("target", &config.target)
            .field("attempt_count", config.attempt_count)
            .field("timeout_ms", config.timeout_ms)
            .field("interval_seconds", config.interval_seconds)
            .field("ping_program", &config.ping_program)
            .field("parser", parser)
            .log()
            .await;
    }

    /// Debug record of one attempt's outcome and recorded sample
    pub async fn log_attempt(&self, index: u32, outcome: ProbeOutcome, recorded: u32) {
        self.logger
            .debug(&format!("Attempt {} finished: {}", index, outcome))
            .field("attempt", index)
            .field("outcome", outcome)
            .field("recorded_ms", recorded)
            .log()
            .await;
    }

    /// Warn about an attempt that produced no reading.
    ///
    /// Failed invocations carry their captured text so a broken ping setup
    /// is diagnosable; unparseable output only shows it at debug level.
    pub async fn log_probe_failure(&self, index: u32, error: &ProbeError) {
        match error {
            ProbeError::UnparseableOutput { output } => {
                self.logger
                    .debug(&format!("Attempt {}: {}", index, error))
                    .field("attempt", index)
                    .field("kind", error.kind())
                    .field("output", output.trim())
                    .log()
                    .await;
            }
            _ => {
                let mut builder = self
                    .logger
                    .warn(&format!("ping command error: {}", error))
                    .field("attempt", index)
                    .field("kind", error.kind());
                if let Some(output) = error.output() {
                    builder = builder.field("output", output.trim());
                }
                builder.log().await;
            }
        }
    }

    pub async fn log_run_summary(&self, summary: &RunSummary) {
        self.logger
            .info(&format!(
                "Run finished: {} attempts, {} timed out, mean {}ms",
                summary.attempts,
                summary.timeouts,
                summary.mean_label()
            ))
            .field("attempts", summary.attempts)
            .field("timeouts", summary.timeouts)
            .field("mean_ms", summary.mean_ms)
            .log()
            .await;
    }

    pub async fn log_error(&self, error: &AppError, context: Option<&str>) {
        let message = match context {
            Some(ctx) => format!("{}: {}", ctx, error),
            None => error.to_string(),
        };

        let mut builder = self.logger.error(&message).error_info(error);
        if let Some(ctx) = context {
            builder = builder.field("context", ctx);
        }
        builder.log().await;
    }
}

/// Hands out loggers that share one session ID
pub struct LoggerFactory {
    config: RunConfiguration,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: RunConfiguration) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    pub async fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::from_logger(self.create_logger("PING").await)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
