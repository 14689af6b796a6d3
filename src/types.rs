//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Ping output parsing strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Pick the strategy matching the current platform's ping utility
    #[default]
    Auto,
    /// `<1ms` / `=<N>ms` markers, as printed by the Windows ping utility
    Marker,
    /// Marker rules plus fractional `time=12.3 ms` readings from iputils/BSD ping
    Iputils,
}

impl ParserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Marker => "marker",
            Self::Iputils => "iputils",
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "marker" | "windows" => Ok(Self::Marker),
            "iputils" | "unix" => Ok(Self::Iputils),
            _ => Err(AppError::parse(format!("Invalid parser kind: {}", s))),
        }
    }
}

/// Latency classification used to color status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyLevel {
    /// Below 50ms
    Excellent,
    /// 50-100ms
    Good,
    /// 100-300ms
    Fair,
    /// 300ms and above
    Poor,
    /// No reply
    Timeout,
}

impl LatencyLevel {
    /// Classify a single probe reply
    pub fn from_latency(latency_ms: Option<u32>) -> Self {
        match latency_ms {
            None => Self::Timeout,
            Some(ms) if ms < 50 => Self::Excellent,
            Some(ms) if ms < 100 => Self::Good,
            Some(ms) if ms < 300 => Self::Fair,
            Some(_) => Self::Poor,
        }
    }
}
