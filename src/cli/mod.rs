//! Command-line interface with topic help

pub mod help;

pub use help::HelpSystem;

use crate::types::ParserKind;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Ping Stability Tester - ping one host repeatedly and chart the latency
#[derive(Parser, Debug, Clone)]
#[command(name = "pst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host name or IP address to ping (default: 8.8.8.8)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Number of ping attempts
    #[arg(short, long, value_parser = parse_count)]
    pub count: Option<u32>,

    /// Per-attempt wait time in milliseconds (0-1000)
    #[arg(short = 'w', long, value_name = "MS", value_parser = parse_timeout_ms)]
    pub timeout: Option<u32>,

    /// Pause between attempts in seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_interval)]
    pub interval: Option<u64>,

    /// Where to write the SVG chart
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Ping executable to invoke
    #[arg(long, value_name = "PROGRAM")]
    pub ping_program: Option<String>,

    /// How ping output is read
    #[arg(long, value_enum)]
    pub parser: Option<ParserKind>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// List the built-in target hosts and exit
    #[arg(long)]
    pub list_targets: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for specific topic (config, targets, parsing, chart, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(ref target) = self.target {
            if target.trim().is_empty() {
                return Err("--target cannot be empty".to_string());
            }
        }

        Ok(())
    }

    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Help for the requested topic, or the main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors).unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: {}\n\n{}",
                    topic,
                    HelpSystem::topics().join(", "),
                    help_system.display_main_help(use_colors)
                )
            })
        } else {
            help_system.display_main_help(use_colors)
        }
    }
}

/// Reject signs and radix prefixes that `str::parse` would otherwise accept
fn parse_plain_number<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid {}: {}", what, s));
    }
    s.parse::<T>().map_err(|_| format!("Invalid {}: {}", what, s))
}

fn parse_count(s: &str) -> Result<u32, String> {
    parse_plain_number::<u32>(s, "count").and_then(|count| {
        if count == 0 {
            Err("Count must be at least 1".to_string())
        } else if count > crate::defaults::MAX_ATTEMPT_COUNT {
            Err(format!("Count cannot exceed {}", crate::defaults::MAX_ATTEMPT_COUNT))
        } else {
            Ok(count)
        }
    })
}

fn parse_timeout_ms(s: &str) -> Result<u32, String> {
    parse_plain_number::<u32>(s, "timeout").and_then(|ms| {
        if ms > crate::defaults::MAX_TIMEOUT_MS {
            Err(format!("Timeout cannot exceed {}ms", crate::defaults::MAX_TIMEOUT_MS))
        } else {
            Ok(ms)
        }
    })
}

fn parse_interval(s: &str) -> Result<u64, String> {
    parse_plain_number::<u64>(s, "interval").and_then(|secs| {
        if secs > crate::defaults::MAX_INTERVAL_SECONDS {
            Err(format!(
                "Interval cannot exceed {} seconds",
                crate::defaults::MAX_INTERVAL_SECONDS
            ))
        } else {
            Ok(secs)
        }
    })
}

/// Check if the terminal supports color output.
///
/// Both output streams must be terminals; a redirected stream gets plain text.
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    if !(io::stdout().is_terminal() && io::stderr().is_terminal()) {
        return false;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_basic() {
        let cli = Cli::parse_from(["pst", "--target", "8.8.4.4", "--count", "5", "--timeout", "800"]);
        assert_eq!(cli.target.as_deref(), Some("8.8.4.4"));
        assert_eq!(cli.count, Some(5));
        assert_eq!(cli.timeout, Some(800));
        assert_eq!(cli.interval, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["pst", "-t", "one.one.one.one", "-c", "10", "-w", "250", "-i", "0", "-o", "out.svg"]);
        assert_eq!(cli.target.as_deref(), Some("one.one.one.one"));
        assert_eq!(cli.count, Some(10));
        assert_eq!(cli.timeout, Some(250));
        assert_eq!(cli.interval, Some(0));
        assert_eq!(cli.output, Some(PathBuf::from("out.svg")));
    }

    #[test]
    fn test_cli_parser_choice() {
        let cli = Cli::parse_from(["pst", "--parser", "iputils", "--ping-program", "/bin/ping"]);
        assert_eq!(cli.parser, Some(ParserKind::Iputils));
        assert_eq!(cli.ping_program.as_deref(), Some("/bin/ping"));

        assert!(Cli::try_parse_from(["pst", "--parser", "nonsense"]).is_err());
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(parse_count("1").unwrap(), 1);
        assert_eq!(parse_count("10000").unwrap(), 10000);
        assert!(parse_count("0").is_err());
        assert!(parse_count("10001").is_err());
        assert!(parse_count("-1").is_err());
        assert!(parse_count("+4").is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_ms("0").unwrap(), 0);
        assert_eq!(parse_timeout_ms("1000").unwrap(), 1000);
        assert!(parse_timeout_ms("1001").is_err());
        assert!(parse_timeout_ms("0x10").is_err());
        assert!(parse_timeout_ms("1.5").is_err());
        assert!(parse_timeout_ms("").is_err());
    }

    #[test]
    fn test_interval_parsing() {
        assert_eq!(parse_interval("0").unwrap(), 0);
        assert_eq!(parse_interval("3600").unwrap(), 3600);
        assert!(parse_interval("3601").is_err());
        assert!(parse_interval("abc").is_err());
    }

    #[test]
    fn test_cli_out_of_range_rejected_by_clap() {
        assert!(Cli::try_parse_from(["pst", "--timeout", "5000"]).is_err());
        assert!(Cli::try_parse_from(["pst", "--count", "0"]).is_err());
    }

    #[test]
    fn test_validate_conflicting_colors() {
        let cli = Cli::parse_from(["pst", "--color", "--no-color"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["pst", "--no-color"]);
        assert!(cli.validate().is_ok());
        assert!(!cli.use_colors());

        let cli = Cli::parse_from(["pst", "--color"]);
        assert!(cli.use_colors());
    }

    #[test]
    fn test_validate_empty_target() {
        let cli = Cli::parse_from(["pst", "--target", " "]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_help_topic_methods() {
        let cli = Cli::parse_from(["pst", "--help-topic", "parsing"]);
        assert!(cli.should_show_topic_help());
        assert_eq!(cli.get_help_topic(), Some("parsing"));

        let cli = Cli::parse_from(["pst"]);
        assert!(!cli.should_show_topic_help());
    }

    #[test]
    fn test_help_display() {
        let cli = Cli::parse_from(["pst", "--no-color"]);
        assert!(cli.display_help().contains("USAGE:"));

        let cli = Cli::parse_from(["pst", "--no-color", "--help-topic", "config"]);
        assert!(cli.display_help().contains("CONFIGURATION REFERENCE"));

        let cli = Cli::parse_from(["pst", "--no-color", "--help-topic", "invalid"]);
        assert!(cli.display_help().contains("Unknown help topic"));
    }
}
