//! Command-line help with usage examples and topic pages
//!
//! `--help-topic <topic>` prints one reference page; without a topic the
//! main help summarizes options, examples and environment variables.

use crate::{config::env::EnvManager, probe::platform::get_platform_name, probe::PingFlavor};
use colored::*;

const TOPICS: &[&str] = &["config", "targets", "parsing", "chart", "examples"];

/// Help text builder for the CLI
pub struct HelpSystem {
    platform: String,
}

impl HelpSystem {
    pub fn new() -> Self {
        Self {
            platform: get_platform_name(),
        }
    }

    /// Names accepted by `--help-topic`
    pub fn topics() -> &'static [&'static str] {
        TOPICS
    }

    /// Display the main help message with all available options
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_options_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_environment_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_footer(use_colors));

        help
    }

    /// Reference page for one topic, `None` if the topic is unknown
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "config" | "configuration" | "env" => Some(self.format_configuration_help(use_colors)),
            "targets" | "target" => Some(self.format_targets_help(use_colors)),
            "parsing" | "parser" => Some(self.format_parsing_help(use_colors)),
            "chart" | "output" => Some(self.format_chart_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            _ => None,
        }
    }

    fn heading(text: &str, use_colors: bool) -> String {
        if use_colors {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "Ping Stability Tester";
        let subtitle = "Ping one host repeatedly and chart the round-trip latency";
        let version = env!("CARGO_PKG_VERSION");

        if use_colors {
            format!(
                "{}\n{}\nVersion: {} | Platform: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                version.green(),
                self.platform.yellow()
            )
        } else {
            format!("{}\n{}\nVersion: {} | Platform: {}\n", title, subtitle, version, self.platform)
        }
    }

    fn format_usage_section(&self, use_colors: bool) -> String {
        let usage_patterns = [
            "pst [OPTIONS]",
            "pst --target <HOST> --count <N> [OPTIONS]",
            "pst --list-targets",
            "pst --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", Self::heading("USAGE:", use_colors));
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }
        usage
    }

    fn format_options_section(&self, use_colors: bool) -> String {
        let options = [
            OptionHelp {
                short: Some("t"),
                long: "target",
                value: "<HOST>",
                description: "Host name or IP address to ping",
                example: Some("--target one.one.one.one"),
            },
            OptionHelp {
                short: Some("c"),
                long: "count",
                value: "<N>",
                description: "Number of ping attempts (1-10000)",
                example: Some("--count 20"),
            },
            OptionHelp {
                short: Some("w"),
                long: "timeout",
                value: "<MS>",
                description: "Per-attempt wait time in milliseconds (0-1000)",
                example: Some("--timeout 800"),
            },
            OptionHelp {
                short: Some("i"),
                long: "interval",
                value: "<SECONDS>",
                description: "Pause between attempts in seconds",
                example: Some("--interval 0"),
            },
            OptionHelp {
                short: Some("o"),
                long: "output",
                value: "<PATH>",
                description: "Where to write the SVG chart",
                example: Some("--output run.svg"),
            },
            OptionHelp {
                short: None,
                long: "parser",
                value: "<KIND>",
                description: "Output parser: auto, marker or iputils",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "ping-program",
                value: "<PROGRAM>",
                description: "Ping executable to invoke",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "json",
                value: "",
                description: "Print the run report as JSON",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "list-targets",
                value: "",
                description: "List the built-in target hosts",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "verbose",
                value: "",
                description: "Show run details and info-level logs",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "debug",
                value: "",
                description: "Show debug logs as JSON and build information",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "no-color",
                value: "",
                description: "Disable colored output",
                example: None,
            },
        ];

        let mut output = format!("{}\n", Self::heading("OPTIONS:", use_colors));
        for option in options {
            output.push_str(&option.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = [
            ExampleHelp {
                title: "Quick check",
                command: "pst",
                description: "Ping 8.8.8.8 four times, one second apart, and save ping-result.svg",
            },
            ExampleHelp {
                title: "Longer run against a custom host",
                command: "pst --target www.google.com --count 60 --interval 1",
                description: "One minute of samples; runs over 30 attempts are drawn without markers",
            },
            ExampleHelp {
                title: "Fast burst with a tight timeout",
                command: "pst -t 1.1.1.1 -c 20 -i 0 -w 200",
                description: "Back-to-back probes; anything slower than 200ms counts as a timeout",
            },
            ExampleHelp {
                title: "Machine-readable report",
                command: "pst --json --no-color -o /tmp/run.svg",
                description: "Progress goes to stderr; the JSON report is the only stdout output",
            },
        ];

        let mut output = format!("{}\n", Self::heading("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_environment_section(&self, use_colors: bool) -> String {
        let mut output = format!("{}\n", Self::heading("ENVIRONMENT VARIABLES:", use_colors));
        output.push_str("Configuration priority: CLI arguments > Environment variables > Defaults\n\n");

        for (var_name, description, _example) in EnvManager::get_supported_env_vars() {
            if use_colors {
                output.push_str(&format!("  {}: {}\n", var_name.bright_yellow().bold(), description));
            } else {
                output.push_str(&format!("  {}: {}\n", var_name, description));
            }
        }
        output
    }

    fn format_footer(&self, use_colors: bool) -> String {
        let mut footer = format!("{}\n", Self::heading("ADDITIONAL HELP:", use_colors));

        let help_topics = [
            ("--help-topic config", "Configuration sources, limits and .env files"),
            ("--help-topic targets", "Built-in target hosts and custom targets"),
            ("--help-topic parsing", "How ping output becomes a latency reading"),
            ("--help-topic chart", "What the chart shows and how it is framed"),
            ("--help-topic examples", "Usage examples"),
        ];

        for (command, description) in help_topics {
            if use_colors {
                footer.push_str(&format!("  {}: {}\n", command.bright_yellow(), description));
            } else {
                footer.push_str(&format!("  {}: {}\n", command, description));
            }
        }
        footer
    }

    fn format_configuration_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::heading("CONFIGURATION REFERENCE:", use_colors));

        help.push_str("CONFIGURATION PRIORITY (highest to lowest):\n");
        help.push_str("1. Command-line arguments\n");
        help.push_str("2. Environment variables (including a .env file in the current directory)\n");
        help.push_str("3. Default values\n\n");

        help.push_str("PARAMETER LIMITS:\n");
        help.push_str(&format!("- Attempts: 1-{}\n", crate::defaults::MAX_ATTEMPT_COUNT));
        help.push_str(&format!("- Timeout: 0-{} milliseconds\n", crate::defaults::MAX_TIMEOUT_MS));
        help.push_str(&format!("- Interval: 0-{} seconds\n\n", crate::defaults::MAX_INTERVAL_SECONDS));

        help.push_str("SUPPORTED VARIABLES:\n");
        for (var_name, description, example) in EnvManager::get_supported_env_vars() {
            help.push_str(&format!("{}:\n  {}\n  Example: {}\n\n", var_name, description, example));
        }

        help.push_str("EXAMPLE .env FILE:\n");
        help.push_str(&EnvManager::create_example_env_content());
        help
    }

    fn format_targets_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::heading("TARGETS:", use_colors));

        help.push_str("Built-in targets:\n");
        for target in crate::defaults::CANDIDATE_TARGETS {
            let marker = if *target == crate::defaults::DEFAULT_TARGET { " (default)" } else { "" };
            help.push_str(&format!("  {}{}\n", target, marker));
        }

        help.push_str("\nAny other host name or IP address is accepted as well; the\n");
        help.push_str("configuration check then prints an informational note.\n");
        help.push_str("Targets starting with '-' are rejected so they cannot be read as ping flags.\n");
        help
    }

    fn format_parsing_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::heading("PING OUTPUT PARSING:", use_colors));

        help.push_str("Each attempt runs the ping utility once and reads its output:\n");
        help.push_str("  - output containing '<1ms' reads as 0ms\n");
        help.push_str("  - otherwise '=<N>ms' reads as N ms\n");
        help.push_str("  - the iputils parser also reads 'time=12.7 ms' (truncated to 12ms)\n");
        help.push_str("  - anything else, or a failing ping, is a timeout\n\n");

        help.push_str("Timeouts are recorded as the configured timeout value, so they pull\n");
        help.push_str("the average up.\n\n");

        let flavor = PingFlavor::current();
        help.push_str(&format!(
            "On {} the 'auto' parser uses '{}', and ping is invoked as:\n  ping {}\n",
            self.platform,
            flavor.default_parser(),
            flavor.args("<target>", crate::defaults::DEFAULT_TIMEOUT_MS).join(" ")
        ));
        help
    }

    fn format_chart_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::heading("CHART:", use_colors));

        help.push_str("The chart is written as SVG after the last attempt.\n");
        help.push_str("  - x axis: attempt index, starting at 1\n");
        help.push_str("  - y axis: latency in milliseconds\n");
        help.push_str("  - a red line marks the average, labelled 'average=<mean>'\n");
        help.push_str(&format!(
            "  - runs of up to {} attempts get a marker per point\n",
            crate::output::MARKER_THRESHOLD
        ));
        help.push_str("  - the y range is min - 5% of max up to max + 5%\n");
        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
    example: Option<&'static str>,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let mut option_str = String::new();

        if let Some(short) = self.short {
            if use_colors {
                option_str.push_str(&format!("  {}, ", format!("-{}", short).bright_cyan()));
            } else {
                option_str.push_str(&format!("  -{}, ", short));
            }
        } else {
            option_str.push_str("      ");
        }

        let long_with_value = if self.value.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("--{} {}", self.long, self.value)
        };

        if use_colors {
            option_str.push_str(&format!("{:<30} {}", long_with_value.bright_cyan(), self.description));
        } else {
            option_str.push_str(&format!("{:<30} {}", long_with_value, self.description));
        }

        if let Some(example) = self.example {
            if use_colors {
                option_str.push_str(&format!(
                    "\n{}{}",
                    " ".repeat(36),
                    format!("Example: {}", example).bright_blue().italic()
                ));
            } else {
                option_str.push_str(&format!("\n{}Example: {}", " ".repeat(36), example));
            }
        }

        option_str
    }
}

struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!(
                "  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n", self.title, self.command, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_display() {
        let help_system = HelpSystem::new();
        let plain = help_system.display_main_help(false);

        assert!(plain.contains("Ping Stability Tester"));
        assert!(plain.contains("USAGE:"));
        assert!(plain.contains("OPTIONS:"));
        assert!(plain.contains("EXAMPLES:"));
        assert!(plain.contains("PING_TARGET"));
        assert!(plain.contains("--list-targets"));
    }

    #[test]
    fn test_every_topic_renders() {
        let help_system = HelpSystem::new();
        for topic in HelpSystem::topics() {
            let page = help_system.display_topic_help(topic, false);
            assert!(page.is_some(), "topic {} missing", topic);
            assert!(!page.unwrap().is_empty());
        }
        assert!(help_system.display_topic_help("CONFIG", false).is_some());
        assert!(help_system.display_topic_help("dns", false).is_none());
    }

    #[test]
    fn test_targets_help_lists_candidates() {
        let page = HelpSystem::new().display_topic_help("targets", false).unwrap();
        for target in crate::defaults::CANDIDATE_TARGETS {
            assert!(page.contains(target));
        }
        assert!(page.contains("8.8.8.8 (default)"));
    }

    #[test]
    fn test_parsing_help_mentions_markers() {
        let page = HelpSystem::new().display_topic_help("parsing", false).unwrap();
        assert!(page.contains("'<1ms'"));
        assert!(page.contains("'=<N>ms'"));
        assert!(page.contains("ping "));
    }

    #[test]
    fn test_config_help_includes_limits() {
        let page = HelpSystem::new().display_topic_help("config", false).unwrap();
        assert!(page.contains("CONFIGURATION REFERENCE"));
        assert!(page.contains("Timeout: 0-1000 milliseconds"));
        assert!(page.contains("PING_COUNT="));
    }

    #[test]
    fn test_option_formatting() {
        let option = OptionHelp {
            short: Some("c"),
            long: "count",
            value: "<N>",
            description: "Number of ping attempts",
            example: Some("--count 5"),
        };
        let text = option.format(false);
        assert!(text.starts_with("  -c, --count <N>"));
        assert!(text.contains("Example: --count 5"));
    }
}
