// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use gamloc::app_config::{self, Config};
use gamloc::{Controller, ExtractionOutcome};

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan script files and write record lists for translation
    Extract {
        /// Script and asset tree to scan
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,

        /// Directory receiving globals.json, objects.json and windows.json
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Reinject translated records into scripts, stories and binary assets
    Import {
        /// Encoding of the target language
        #[arg(short, long)]
        encoding: Option<String>,

        /// Directory containing translation files
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions for gamloc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// gamloc - Game script localization toolkit
///
/// Extracts translatable text from game scripts into JSON record lists and
/// reinjects the finished translations into scripts and binary assets.
#[derive(Parser, Debug)]
#[command(name = "gamloc")]
#[command(version)]
#[command(about = "Localization extractor and importer for script-driven games")]
#[command(long_about = "gamloc extracts translatable text from game scripts and reinjects translations.

EXAMPLES:
    gamloc extract                           # Write Extracted/{globals,objects,windows}.json
    gamloc import                            # Apply translations from ./utf8 into ./Output
    gamloc import -e gb2312 -d translated    # Use a specific encoding and record directory
    gamloc --log-level debug import          # Show per-file details
    gamloc completions bash > gamloc.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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

    // @returns: Emoji and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
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
            let (emoji, colour) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger with trace so the level can be lowered later
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "gamloc", &mut std::io::stdout());
        return Ok(());
    }

    let (mut config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', creating default config.", cli.config_path);
    }

    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Extract { assets, output } => {
            if let Some(assets) = assets {
                config.asset_dir = assets;
            }
            if let Some(output) = output {
                config.extracted_dir = output;
            }

            let controller = Controller::with_config(config)?;
            if let ExtractionOutcome::Completed(paths) = controller.run_extraction() {
                for path in paths {
                    info!("Success: {:?}", path);
                }
            }
            Ok(())
        }
        Commands::Import { encoding, dir } => {
            if let Some(encoding) = encoding {
                config.encoding = encoding;
            }
            if let Some(dir) = dir {
                config.translations_dir = dir;
            }

            let controller = Controller::with_config(config)?;
            let summary = controller.run_import().await.map_err(|e| {
                error!("{}", e);
                anyhow!("Import aborted: {}", e)
            })?;

            if summary.failed > 0 {
                warn!("{} files could not be processed", summary.failed);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}
