// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::{Engine, EngineConfig, ShapeResult};

mod diagnostics;
mod errors;
mod exchange;
mod grouping;
mod pipeline;
mod reflow;
mod retime;
mod segment;
mod splitting;
mod timecode;
mod transcript;

/// Log level choices exposed on the command line
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&CliLogLevel> for LevelFilter {
    fn from(level: &CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full shaping: redistribute timing and split oversized cards (default)
    Reshape(ShapeArgs),

    /// Redistribute timing within continuity groups, without splitting
    Retime(ShapeArgs),

    /// Generate shell completions for subshape
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ShapeArgs {
    /// Input subtitle file (.srt)
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (defaults to <input>.reshaped.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Maximum gap in ms for two cards to count as one utterance
    #[arg(long)]
    max_gap_ms: Option<u64>,

    /// Minimum duration in ms per redistributed card
    #[arg(long)]
    min_duration_ms: Option<u64>,

    /// Gap in ms inserted between shaped cards
    #[arg(long)]
    gap_ms: Option<u64>,

    /// Character threshold for the first splitting pass
    #[arg(long)]
    first_char_limit: Option<usize>,

    /// Character threshold for the second splitting pass
    #[arg(long)]
    second_char_limit: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subshape - subtitle timing & segmentation engine
///
/// Reshapes machine-generated subtitle files: splits oversized caption cards
/// at natural boundaries and redistributes timing proportionally to word
/// count while preserving each utterance's original boundaries.
#[derive(Parser, Debug)]
#[command(name = "subshape")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle timing & segmentation engine")]
#[command(long_about = "subshape reshapes machine-generated subtitle files.

EXAMPLES:
    subshape episode.srt                        # Full reshape with default config
    subshape reshape -o out.srt episode.srt     # Explicit output path
    subshape retime episode.srt                 # Timing redistribution only
    subshape --first-char-limit 50 episode.srt  # Override a split threshold
    subshape completions bash > subshape.bash   # Generate bash completions

CONFIGURATION:
    Knobs are stored in conf.json by default; a default file is created when
    none exists. Command-line flags override configuration values.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file (.srt)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (defaults to <input>.reshaped.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Maximum gap in ms for two cards to count as one utterance
    #[arg(long)]
    max_gap_ms: Option<u64>,

    /// Minimum duration in ms per redistributed card
    #[arg(long)]
    min_duration_ms: Option<u64>,

    /// Gap in ms inserted between shaped cards
    #[arg(long)]
    gap_ms: Option<u64>,

    /// Character threshold for the first splitting pass
    #[arg(long)]
    first_char_limit: Option<usize>,

    /// Character threshold for the second splitting pass
    #[arg(long)]
    second_char_limit: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// Custom logger: colored, timestamped, to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // updated after the config is loaded if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subshape", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Reshape(args)) => run_shape(args, false),
        Some(Commands::Retime(args)) => run_shape(args, true),
        None => {
            // Default behavior - treat top-level args as a reshape invocation
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let args = ShapeArgs {
                input_path,
                output: cli.output,
                config_path: cli.config_path,
                max_gap_ms: cli.max_gap_ms,
                min_duration_ms: cli.min_duration_ms,
                gap_ms: cli.gap_ms,
                first_char_limit: cli.first_char_limit,
                second_char_limit: cli.second_char_limit,
                log_level: cli.log_level,
            };
            run_shape(args, false)
        }
    }
}

fn run_shape(options: ShapeArgs, retime_only: bool) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(level.into());
    }

    let config = load_config(&options)?;
    config.validate().context("Configuration validation failed")?;
    let engine = Engine::with_config(config)?;

    let content = read_subtitle_file(&options.input_path)?;

    let result = if retime_only {
        engine.redistribute(&content)
    } else {
        engine.reshape(&content)
    };

    report(&result);

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&options.input_path));
    std::fs::write(&output_path, &result.output)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    info!("Wrote {} segments to {}", result.segments_out, output_path.display());
    Ok(())
}

fn load_config(options: &ShapeArgs) -> Result<EngineConfig> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = EngineConfig::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Command-line flags win over configuration values
    if let Some(max_gap_ms) = options.max_gap_ms {
        config.max_gap_ms = max_gap_ms;
    }
    if let Some(min_duration_ms) = options.min_duration_ms {
        config.min_duration_ms = min_duration_ms;
    }
    if let Some(gap_ms) = options.gap_ms {
        config.gap_ms = gap_ms;
    }
    if let Some(first_char_limit) = options.first_char_limit {
        config.first_pass_char_limit = first_char_limit;
    }
    if let Some(second_char_limit) = options.second_char_limit {
        config.second_pass_char_limit = second_char_limit;
    }

    Ok(config)
}

/// Read a subtitle file, tolerating a UTF-8 BOM and falling back to a
/// latin-1 interpretation when the bytes are not valid UTF-8
fn read_subtitle_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("Input is not valid UTF-8, falling back to latin-1 decoding");
            err.into_bytes().iter().map(|&b| b as char).collect()
        }
    };

    Ok(content.trim_start_matches('\u{feff}').to_string())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().to_string());
    match stem {
        Some(stem) => input.with_file_name(format!("{}.reshaped.srt", stem)),
        None => input.with_extension("reshaped.srt"),
    }
}

fn report(result: &ShapeResult) {
    info!(
        "Shaped {} segments into {}",
        result.segments_in, result.segments_out
    );
    let warnings = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == diagnostics::Severity::Warning)
        .count();
    if warnings > 0 {
        warn!("{} warning(s) recorded during shaping", warnings);
    }
}
