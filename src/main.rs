//! Date Sorter - sort a flat photo folder into year/month/day folders
//!
//! A CLI tool that moves every `.jpg` image of a directory into a folder
//! named after its EXIF capture date, and every other file into a
//! catch-all folder.

use anyhow::Result;
use clap::Parser;
use date_sorter::cli::usage_message;
use date_sorter::{
    Cli, Config, ConsoleProgress, FileResult, NoProgress, ProcessingStats, ProcessingStatus,
    Processor, ProgressSink,
};
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Colours and layout for the end-of-run summary.

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colours
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(&format!("{}\n", "─".repeat(60))));
    }

    /// Centered bold title
    pub fn print_title(title: &str) {
        let width: usize = 60;
        let padding = width.saturating_sub(title.len()) / 2;
        let _ = stdout().execute(Print(" ".repeat(padding)));
        let _ = stdout().execute(Print(title.bold()));
        let _ = stdout().execute(Print("\n"));
    }

    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_stat(key: &str, value: &str, color: Color) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = style(value).with(color).bold();
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// One line per file: status icon, source, destination or error
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, dest_or_msg: &str) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(status_icon).with(status_color).bold()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(source).italic()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(dest_or_msg).with(CliTheme::HINT)));
        let _ = stdout().execute(Print("\n"));
    }

    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

/// How a run ended without a fatal error
#[derive(Debug, PartialEq, Eq)]
enum RunOutcome {
    /// `--sample-config` was printed
    SampleConfig,
    /// Directory argument missing or repeated
    Usage,
    /// Every file was handled; skipped ones are counted in the stats
    Completed(ProcessingStats),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Everything `main` does, minus turning the result into an exit code
fn run(cli: &Cli) -> Result<RunOutcome> {
    if cli.sample_config {
        print!("{}", Config::sample_config());
        return Ok(RunOutcome::SampleConfig);
    }

    let Some(input_dir) = cli.input_dir() else {
        println!("{}", usage_message());
        return Ok(RunOutcome::Usage);
    };

    let config = load_config(cli)?;
    let _guard = setup_logging(cli, config.verbose)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Date Sorter starting");
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    let mut sink: Box<dyn ProgressSink> = if config.show_progress {
        Box::new(ConsoleProgress::new())
    } else {
        Box::new(NoProgress)
    };

    let mut processor = Processor::new(config)?;
    println!("Organizing {}", input_dir.display());

    let results = processor.run(sink.as_mut())?;
    print_summary(processor.stats(), &results, processor.config().verbose);

    Ok(RunOutcome::Completed(processor.stats().clone()))
}

fn print_summary(stats: &ProcessingStats, results: &[FileResult], verbose: bool) {
    use cli_output::*;

    print_separator();
    print_title("Organizing complete");
    print_separator();

    print_blank();
    print_stat("Total files", &stats.total_files.to_string(), CliTheme::ACCENT);
    print_stat("Moved", &stats.moved().to_string(), CliTheme::SUCCESS);
    print_stat("  Dated", &stats.dated.to_string(), CliTheme::SUCCESS);
    print_stat("  Unknown dates", &stats.unknown_dates.to_string(), CliTheme::WARNING);
    print_stat("  Error files", &stats.error_files.to_string(), CliTheme::WARNING);
    print_stat("  Others", &stats.others.to_string(), CliTheme::SUCCESS);
    print_stat("Skipped", &stats.failed.to_string(), CliTheme::ERROR);
    print_blank();

    if verbose {
        print_separator();
        print_hint("Detailed results");
        print_blank();

        for result in results {
            let source = result.source.display().to_string();
            match result.status {
                ProcessingStatus::Success => {
                    let dest = result
                        .destination
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    print_result("✓", CliTheme::SUCCESS, &source, &format!("→ {}", dest));
                }
                ProcessingStatus::Failed => {
                    let error_msg = result.error.as_deref().unwrap_or("unknown error");
                    print_result("✗", CliTheme::ERROR, &source, error_msg);
                }
            }
        }
    }

    let failed_items: Vec<_> = results
        .iter()
        .filter(|r| r.status == ProcessingStatus::Failed)
        .collect();

    if !failed_items.is_empty() {
        print_separator();
        print_error(&format!("{} files were left in place", failed_items.len()));
        print_blank();
        for result in &failed_items {
            print_result(
                "✗",
                CliTheme::ERROR,
                &result.source.display().to_string(),
                result.error.as_deref().unwrap_or("unknown error"),
            );
        }
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    config.validate()?;

    Ok(config)
}

/// Default log level and console level
fn log_levels(verbose: bool) -> (Level, LevelFilter) {
    if verbose {
        (Level::DEBUG, LevelFilter::DEBUG)
    } else {
        (Level::INFO, LevelFilter::WARN)
    }
}

/// Console logging to stderr, plus an optional log file.
///
/// The console only shows warnings and errors unless verbose, so
/// informational per-file events stay off the progress bar line.
fn setup_logging(cli: &Cli, verbose: bool) -> Result<Option<WorkerGuard>> {
    let (level, console_level) = log_levels(verbose);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_level),
    );

    // An already installed global subscriber is kept
    let Some(log_path) = cli.log_file.as_deref() else {
        let _ = subscriber.try_init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    if cli.json_log {
        let _ = subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init();
    } else {
        let _ = subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .try_init();
    }

    Ok(Some(guard))
}
