//! Configuration assembly from defaults, .env, environment and CLI arguments

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::RunConfiguration,
};
use std::path::PathBuf;

/// Builds a [`RunConfiguration`] from every configuration source
pub struct ConfigParser {
    cli: Cli,
    env_file: PathBuf,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: PathBuf::from(".env"),
        }
    }

    /// Read variables from `path` instead of `./.env`
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = path.into();
        self
    }

    /// Defaults, then .env, then environment variables, then CLI flags; validated last
    pub fn parse(&self) -> Result<RunConfiguration> {
        let mut config = RunConfiguration::default();

        let loaded = EnvManager::load_env_file_from(&self.env_file)?;
        if self.cli.debug {
            self.report_env_problems(loaded)?;
        }

        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Debug-mode report of bad .env lines, or of bad variables when there is no file
    fn report_env_problems(&self, loaded: bool) -> Result<()> {
        if !loaded {
            eprintln!("No {} file found, using defaults and CLI arguments", self.env_file.display());
            for warning in EnvManager::validate_current_env() {
                eprintln!("{}", warning);
            }
            return Ok(());
        }

        eprintln!("Loaded configuration from {}", self.env_file.display());
        if let Some(problems) = EnvManager::check_env_file(&self.env_file)? {
            for problem in problems {
                eprintln!("{}: {}", self.env_file.display(), problem);
            }
        }
        Ok(())
    }

    fn apply_cli_overrides(&self, config: &mut RunConfiguration) {
        let cli = &self.cli;

        if let Some(ref target) = cli.target {
            config.target = target.trim().to_string();
        }
        if let Some(count) = cli.count {
            config.attempt_count = count;
        }
        if let Some(timeout) = cli.timeout {
            config.timeout_ms = timeout;
        }
        if let Some(interval) = cli.interval {
            config.interval_seconds = interval;
        }
        if let Some(ref output) = cli.output {
            config.chart_path = output.clone();
        }
        if let Some(ref program) = cli.ping_program {
            config.ping_program = program.clone();
        }
        if let Some(parser) = cli.parser {
            config.parser = parser;
        }

        // Without an explicit flag, ENABLE_COLOR can only be honored on a
        // color-capable terminal.
        if cli.color {
            config.enable_color = true;
        } else if cli.no_color || !cli.use_colors() {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = cli.verbose;
        config.debug = cli.debug;
        config.json = cli.json;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<RunConfiguration> {
    ConfigParser::new(cli).parse()
}

/// Multi-line summary shown in verbose and debug mode
pub fn display_config_summary(config: &RunConfiguration) -> String {
    let summary = [
        format!("Target: {}", config.target),
        format!("Attempts: {}", config.attempt_count),
        format!("Timeout: {}ms", config.timeout_ms),
        format!("Interval: {}s", config.interval_seconds),
        format!("Ping Program: {}", config.ping_program),
        format!("Parser: {}", config.parser),
        format!("Chart: {}", config.chart_path.display()),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
