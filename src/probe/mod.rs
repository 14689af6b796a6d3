//! Single-shot ping probing
//!
//! The prober runs the system ping utility once per attempt and maps the
//! captured text to a [`ProbeOutcome`]. The subprocess sits behind the
//! synchronous [`ProbeCommand`] trait so callers decide how blocking work is
//! scheduled, and the text-to-latency mapping is an [`OutputParser`] strategy.

pub mod parser;
pub mod platform;

pub use parser::{parser_for, IputilsParser, MarkerParser, OutputParser};
pub use platform::{get_platform_name, PingFlavor};

use crate::models::{ProbeOutcome, RunConfiguration};
use std::process::{Command, Stdio};
use std::sync::Arc;
use thiserror::Error;

/// Captured result of one ping invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub status: Option<i32>,
    /// Standard output followed by standard error
    pub text: String,
}

impl CommandOutput {
    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            success: true,
            status: Some(0),
            text: text.into(),
        }
    }

    pub fn failure<S: Into<String>>(status: i32, text: S) -> Self {
        Self {
            success: false,
            status: Some(status),
            text: text.into(),
        }
    }
}

/// Reasons a probe attempt yields no latency reading.
///
/// None of these end a run; every variant is recorded as a timeout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The ping process could not be started
    #[error("failed to start '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The ping process ran but reported failure
    #[error("ping exited with {}", describe_status(.status))]
    Invocation { status: Option<i32>, output: String },

    /// The ping process succeeded but printed no recognizable latency
    #[error("ping output contained no latency reading")]
    UnparseableOutput { output: String },
}

impl ProbeError {
    /// Raw captured text, when the process got far enough to produce any
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Spawn { .. } => None,
            Self::Invocation { output, .. } | Self::UnparseableOutput { output } => Some(output),
        }
    }

    /// Short classification for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn",
            Self::Invocation { .. } => "invocation",
            Self::UnparseableOutput { .. } => "unparseable",
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no exit status".to_string(),
    }
}

/// Runs one echo request against a target
pub trait ProbeCommand: Send + Sync {
    /// Run the probe and capture its output; blocks until the process exits
    fn run(&self, target: &str, timeout_ms: u32) -> Result<CommandOutput, ProbeError>;
}

/// The operating system's ping utility
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
    flavor: PingFlavor,
}

impl SystemPing {
    pub fn new<S: Into<String>>(program: S, flavor: PingFlavor) -> Self {
        Self {
            program: program.into(),
            flavor,
        }
    }
}

impl ProbeCommand for SystemPing {
    fn run(&self, target: &str, timeout_ms: u32) -> Result<CommandOutput, ProbeError> {
        let output = Command::new(&self.program)
            .args(self.flavor.args(target, timeout_ms))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ProbeError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            text,
        })
    }
}

/// Issues single probes and classifies their output
#[derive(Clone)]
pub struct Prober {
    command: Arc<dyn ProbeCommand>,
    parser: Arc<dyn OutputParser>,
}

impl Prober {
    pub fn new(command: Arc<dyn ProbeCommand>, parser: Arc<dyn OutputParser>) -> Self {
        Self { command, parser }
    }

    /// Prober backed by the system ping utility as configured
    pub fn from_config(config: &RunConfiguration) -> Self {
        let flavor = PingFlavor::current();
        Self::new(
            Arc::new(SystemPing::new(config.ping_program.clone(), flavor)),
            parser_for(config.parser, flavor),
        )
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Run one probe, keeping the reason when there is no reading
    pub fn attempt(&self, target: &str, timeout_ms: u32) -> Result<u32, ProbeError> {
        let output = self.command.run(target, timeout_ms)?;

        if !output.success {
            return Err(ProbeError::Invocation {
                status: output.status,
                output: output.text,
            });
        }

        self.parser
            .parse(&output.text)
            .ok_or(ProbeError::UnparseableOutput { output: output.text })
    }

    /// Run one probe; every failure reads as [`ProbeOutcome::Timeout`]
    pub fn probe(&self, target: &str, timeout_ms: u32) -> ProbeOutcome {
        self.attempt(target, timeout_ms)
            .map_or(ProbeOutcome::Timeout, ProbeOutcome::Latency)
    }
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober")
            .field("parser", &self.parser.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned results and remembers what it was asked
    struct CannedCommand {
        result: Result<CommandOutput, ProbeError>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl CannedCommand {
        fn new(result: Result<CommandOutput, ProbeError>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProbeCommand for CannedCommand {
        fn run(&self, target: &str, timeout_ms: u32) -> Result<CommandOutput, ProbeError> {
            self.calls.lock().unwrap().push((target.to_string(), timeout_ms));
            self.result.clone()
        }
    }

    fn marker_prober(result: Result<CommandOutput, ProbeError>) -> (Prober, Arc<CannedCommand>) {
        let command = Arc::new(CannedCommand::new(result));
        (Prober::new(command.clone(), Arc::new(MarkerParser)), command)
    }

    #[test]
    fn test_probe_reads_latency() {
        let (prober, command) = marker_prober(Ok(CommandOutput::success("Reply from 8.8.8.8: bytes=32 time=23ms TTL=117")));
        assert_eq!(prober.probe("8.8.8.8", 500), ProbeOutcome::Latency(23));
        assert_eq!(command.calls.lock().unwrap().as_slice(), &[("8.8.8.8".to_string(), 500)]);
    }

    #[test]
    fn test_probe_sub_millisecond() {
        let (prober, _) = marker_prober(Ok(CommandOutput::success("Reply from 10.0.0.1: bytes=32 time<1ms TTL=64")));
        assert_eq!(prober.probe("10.0.0.1", 500), ProbeOutcome::Latency(0));
    }

    #[test]
    fn test_non_zero_exit_is_timeout_even_with_reading() {
        let (prober, _) = marker_prober(Ok(CommandOutput::failure(1, "time=23ms")));
        assert_eq!(prober.probe("8.8.8.8", 500), ProbeOutcome::Timeout);

        let err = prober.attempt("8.8.8.8", 500).unwrap_err();
        assert_eq!(err.kind(), "invocation");
        assert_eq!(err.output(), Some("time=23ms"));
        assert_eq!(err.to_string(), "ping exited with status 1");
    }

    #[test]
    fn test_spawn_failure_is_timeout() {
        let (prober, _) = marker_prober(Err(ProbeError::Spawn {
            program: "ping".to_string(),
            message: "not found".to_string(),
        }));
        assert_eq!(prober.probe("8.8.8.8", 500), ProbeOutcome::Timeout);
        assert_eq!(prober.attempt("8.8.8.8", 500).unwrap_err().output(), None);
    }

    #[test]
    fn test_unparseable_success_is_timeout() {
        let (prober, _) = marker_prober(Ok(CommandOutput::success("Request timed out.")));
        assert_eq!(prober.probe("8.8.8.8", 500), ProbeOutcome::Timeout);
        assert_eq!(prober.attempt("8.8.8.8", 500).unwrap_err().kind(), "unparseable");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let ping = SystemPing::new("definitely-not-a-real-ping-binary", PingFlavor::current());
        let err = ping.run("127.0.0.1", 100).unwrap_err();
        assert_eq!(err.kind(), "spawn");
    }

    #[test]
    fn test_from_config_uses_configured_parser() {
        let mut config = RunConfiguration::default();
        config.parser = crate::types::ParserKind::Marker;
        assert_eq!(Prober::from_config(&config).parser_name(), "marker");
    }
}
