//! Outcome of a single ping attempt

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one probe attempt against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ms", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// A reply was parsed; round-trip time in whole milliseconds
    Latency(u32),
    /// No usable reply: the command failed or its output could not be parsed
    Timeout,
}

impl ProbeOutcome {
    /// Whether this attempt produced no usable reply
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Measured latency, if any
    pub fn latency_ms(&self) -> Option<u32> {
        match self {
            Self::Latency(ms) => Some(*ms),
            Self::Timeout => None,
        }
    }

    /// Value recorded in the sample sequence for this attempt.
    ///
    /// Timeouts are recorded as the configured timeout boundary, which is an
    /// approximation rather than a measured latency.
    pub fn sample_value(&self, timeout_ms: u32) -> u32 {
        self.latency_ms().unwrap_or(timeout_ms)
    }

    /// Human-readable status line for this attempt
    pub fn status_line(&self, target: &str) -> String {
        match self {
            Self::Latency(ms) => format!("reply from {}: time={}ms", target, ms),
            Self::Timeout => "request timed out".to_string(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latency(ms) => write!(f, "{}ms", ms),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}
