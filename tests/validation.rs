//! Output and configuration validation tests
//!
//! Checks the status line formats the console reporter produces and the
//! warnings the configuration validator raises for unusual runs.

use clap::Parser;
use ping_stability_tester::{
    cli::Cli,
    config::{validate_config, ConfigParser, ValidationLevel},
    models::{ProbeOutcome, RunConfiguration, SampleSequence},
    output::ConsoleReporter,
    stats::RunSummary,
};
use regex::Regex;
use tempfile::TempDir;

/// Expected shapes of the console status lines
struct OutputPatterns {
    reply: Regex,
    timeout: Regex,
    average: Regex,
}

impl Default for OutputPatterns {
    fn default() -> Self {
        Self {
            reply: Regex::new(r"^\[\d+/\d+\] reply from \S+: time=\d+ms$").unwrap(),
            timeout: Regex::new(r"^\[\d+/\d+\] request timed out$").unwrap(),
            average: Regex::new(r"^average latency: \d+\.\d{2}ms over \d+ attempts \(\d+ timed out\)$").unwrap(),
        }
    }
}

fn plain_config() -> RunConfiguration {
    RunConfiguration {
        enable_color: false,
        ..RunConfiguration::default()
    }
}

#[test]
fn test_attempt_lines_match_patterns() {
    let patterns = OutputPatterns::default();
    let reporter = ConsoleReporter::new(&plain_config());

    for (index, ms) in [(1, 0), (2, 23), (3, 999)] {
        let line = reporter.format_attempt(index, 3, "8.8.8.8", ProbeOutcome::Latency(ms));
        assert!(patterns.reply.is_match(&line), "unexpected reply line: {}", line);
    }

    let line = reporter.format_attempt(4, 4, "www.google.com", ProbeOutcome::Timeout);
    assert!(patterns.timeout.is_match(&line), "unexpected timeout line: {}", line);
}

#[test]
fn test_completion_lines_match_patterns() {
    let patterns = OutputPatterns::default();
    let reporter = ConsoleReporter::new(&plain_config());

    let mut samples = SampleSequence::new();
    samples.record(ProbeOutcome::Latency(0), 500);
    samples.record(ProbeOutcome::Timeout, 500);
    samples.record(ProbeOutcome::Latency(10), 500);
    let summary = RunSummary::from_samples(&samples).unwrap();

    let text = reporter.format_completion(&summary);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("probing complete"));

    let average = lines.next().unwrap();
    assert!(patterns.average.is_match(average), "unexpected average line: {}", average);
    assert!(average.contains("170.00ms"));
}

#[test]
fn test_colored_lines_keep_their_text() {
    let reporter = ConsoleReporter::new(&RunConfiguration {
        enable_color: true,
        ..RunConfiguration::default()
    });

    let line = reporter.format_attempt(1, 1, "8.8.8.8", ProbeOutcome::Latency(42));
    assert!(line.contains("reply from 8.8.8.8"));
    assert!(line.contains("42ms"));
}

#[test]
fn test_cli_overrides_reach_configuration() {
    let dir = TempDir::new().unwrap();
    let cli = Cli::try_parse_from([
        "pst",
        "--target",
        "one.one.one.one",
        "--count",
        "12",
        "--timeout",
        "250",
        "--interval",
        "0",
        "--parser",
        "iputils",
        "--no-color",
    ])
    .unwrap();

    let config = ConfigParser::new(cli)
        .with_env_file(dir.path().join("absent.env"))
        .parse()
        .unwrap();

    assert_eq!(config.target, "one.one.one.one");
    assert_eq!(config.attempt_count, 12);
    assert_eq!(config.timeout_ms, 250);
    assert_eq!(config.interval_seconds, 0);
    assert!(!config.enable_color);
}

#[test]
fn test_cli_rejects_out_of_range_values() {
    assert!(Cli::try_parse_from(["pst", "--timeout", "1001"]).is_err());
    assert!(Cli::try_parse_from(["pst", "--count", "0"]).is_err());
    assert!(Cli::try_parse_from(["pst", "--interval", "3601"]).is_err());
    assert!(Cli::try_parse_from(["pst", "--parser", "windows"]).is_err());
}

#[test]
fn test_validator_flags_unusual_runs() {
    let dir = TempDir::new().unwrap();
    let config = RunConfiguration {
        target: "192.168.1.1".to_string(),
        attempt_count: 40,
        timeout_ms: 0,
        chart_path: dir.path().join("chart.png"),
        ..plain_config()
    };

    let warnings = validate_config(&config).unwrap();
    let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();

    assert!(warnings.iter().any(|w| w.level == ValidationLevel::Warning));
    assert!(messages.iter().any(|m| m.contains(".svg")));
    assert!(messages.iter().any(|m| m.contains("192.168.1.1")));
}

#[test]
fn test_validator_rejects_missing_chart_directory() {
    let dir = TempDir::new().unwrap();
    let config = RunConfiguration {
        chart_path: dir.path().join("nope").join("chart.svg"),
        ..plain_config()
    };

    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
