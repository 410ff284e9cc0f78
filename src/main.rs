// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{error, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use vtt2srt::app_config::{self, Config, LineEnding};
use vtt2srt::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for LineEnding to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLineEnding {
    Lf,
    Crlf,
}

impl From<CliLineEnding> for LineEnding {
    fn from(cli_ending: CliLineEnding) -> Self {
        match cli_ending {
            CliLineEnding::Lf => LineEnding::Lf,
            CliLineEnding::Crlf => LineEnding::Crlf,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert WebVTT subtitles to SRT (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for vtt2srt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input WebVTT file, or a directory to convert recursively
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output SRT file (defaults to the input path with an .srt extension)
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Line terminator for the SRT output
    #[arg(long, value_enum)]
    line_ending: Option<CliLineEnding>,
}

/// vtt2srt - WebVTT to SubRip converter
///
/// Converts WebVTT subtitle files into SubRip Text files, renumbering cues
/// and rewriting timestamps.
#[derive(Parser, Debug)]
#[command(name = "vtt2srt")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "WebVTT to SRT subtitle converter")]
#[command(long_about = "vtt2srt converts WebVTT subtitle files into SubRip Text (SRT) files.

EXAMPLES:
    vtt2srt movie.vtt                      # Writes movie.srt
    vtt2srt movie.vtt subs/movie.srt       # Explicit output path
    vtt2srt -f movie.vtt                   # Overwrite an existing movie.srt
    vtt2srt --line-ending crlf movie.vtt   # Windows line endings
    vtt2srt /subtitles/                    # Convert every .vtt file below a directory
    vtt2srt completions bash > vtt2srt.bash

CONFIGURATION:
    Settings are read from conf.json by default when it exists. You can
    specify a different file with --config-path. Command line options take
    precedence over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input WebVTT file, or a directory to convert recursively
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output SRT file (defaults to the input path with an .srt extension)
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Line terminator for the SRT output
    #[arg(long, value_enum)]
    line_ending: Option<CliLineEnding>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn get_style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::get_style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// @converts: Configured log level to the log crate filter
fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() {
    // The logger accepts everything; the max level is narrowed once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    if let Err(e) = run_cli() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vtt2srt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let convert_args = ConvertArgs {
                input_path,
                output_path: cli.output_path,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
                line_ending: cli.line_ending,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // Load configuration, then let the command line override it
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(line_ending) = &options.line_ending {
        config.output.line_ending = line_ending.clone().into();
    }

    log::set_max_level(to_level_filter(&config.log_level));
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?;

    if options.input_path.is_dir() {
        if options.output_path.is_some() {
            return Err(anyhow!("OUTPUT_PATH cannot be used when INPUT_PATH is a directory"));
        }

        let summary = controller.run_folder(&options.input_path, options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to convert", summary.failed));
        }
        return Ok(());
    }

    controller.run(
        &options.input_path,
        options.output_path.as_deref(),
        options.force_overwrite,
    )?;

    Ok(())
}
