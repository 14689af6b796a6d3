//! Data models and structures for the ping stability tester

pub mod config;
pub mod probe;
pub mod samples;

// Re-export main model types
pub use config::RunConfiguration;
pub use probe::ProbeOutcome;
pub use samples::SampleSequence;
