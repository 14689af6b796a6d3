//! Ping Stability Tester - Main CLI Application
//!
//! Pings one host a fixed number of times, prints each reply and writes a
//! latency chart with the run's average when done.

use clap::Parser;
use ping_stability_tester::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config, ValidationLevel},
    error::{AppError, ErrorReporter, Result},
    executor::RunExecutor,
    logging::LoggerFactory,
    output::ConsoleReporter,
    probe::Prober,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue with the command line you used.");
        process::exit(1);
    }));

    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if let Err(e) = run_application(cli).await {
        reporter.report_error(&e);
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;

    if cli.should_show_topic_help() {
        println!("{}", cli.display_help());
        return Ok(());
    }

    if cli.list_targets {
        print_targets();
        return Ok(());
    }

    if cli.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!("  Built: {}", option_env!("BUILD_TIME").unwrap_or("unknown"));
        eprintln!("  Commit: {}", option_env!("GIT_COMMIT").unwrap_or("unknown"));
        eprintln!("  Target: {}", option_env!("TARGET_TRIPLE").unwrap_or("unknown"));
        eprintln!();
    }

    let config = load_config(cli)?;

    let warnings = validate_config(&config)?;
    for warning in &warnings {
        if warning.level != ValidationLevel::Info || config.verbose || config.debug {
            eprintln!("{}", warning.format(config.enable_color));
        }
    }

    if (config.verbose || config.debug) && !config.json {
        println!("Configuration:");
        for line in display_config_summary(&config).lines() {
            println!("  {}", line);
        }
        println!();
    }

    let factory = LoggerFactory::new(config.clone());
    let probe_logger = factory.create_probe_logger().await;
    let prober = Prober::from_config(&config);

    let executor = RunExecutor::new(config.clone(), prober, probe_logger);
    let mut reporter = ConsoleReporter::new(&config);

    executor.run(&mut reporter).await?;

    Ok(())
}

fn print_targets() {
    println!("Built-in targets:");
    for target in ping_stability_tester::defaults::CANDIDATE_TARGETS {
        if *target == ping_stability_tester::defaults::DEFAULT_TARGET {
            println!("  {} (default)", target);
        } else {
            println!("  {}", target);
        }
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file and PING_* environment variables");
            eprintln!("  - Timeout must be 0-1000 ms and count at least 1");
            eprintln!("  - Targets must be a host name or IP address");
            eprintln!("  - Run with --help-topic config for details");
        }
        AppError::Io(_) | AppError::Render(_) => {
            eprintln!();
            eprintln!("Chart output help:");
            eprintln!("  - Check that the --output directory exists and is writable");
            eprintln!("  - Try writing to a different path with --output");
        }
        _ => {}
    }
}
