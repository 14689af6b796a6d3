//! Ping Stability Tester
//!
//! Pings one host a fixed number of times, reports every reply as it
//! arrives and finishes with a latency chart that carries the run's average.
//! Failed or unreadable pings count as timeouts and are recorded at the
//! configured timeout value.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{RunExecutor, RunResult};
pub use models::{ProbeOutcome, RunConfiguration, SampleSequence};
pub use output::{render, ConsoleReporter, LatencyChart, RunObserver, RunReport};
pub use probe::{Prober, ProbeCommand, SystemPing};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TARGET: &str = "8.8.8.8";
    /// Hosts offered by `--list-targets`
    pub const CANDIDATE_TARGETS: &[&str] = &[
        "chat.openai.com",
        "one.one.one.one",
        "www.google.com",
        "8.8.8.8",
        "8.8.4.4",
        "4.4.4.2",
    ];
    pub const DEFAULT_ATTEMPT_COUNT: u32 = 4;
    pub const DEFAULT_TIMEOUT_MS: u32 = 500;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
    pub const MAX_ATTEMPT_COUNT: u32 = 10_000;
    pub const MAX_TIMEOUT_MS: u32 = 1000;
    pub const MAX_INTERVAL_SECONDS: u64 = 3600;
    pub const DEFAULT_PING_PROGRAM: &str = "ping";
    pub const DEFAULT_CHART_PATH: &str = "ping-result.svg";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
