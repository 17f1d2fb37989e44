use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::encoding::TextCodec;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target encoding label (e.g. "gb2312")
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Directory holding the translated record lists
    #[serde(default = "default_translations_dir")]
    pub translations_dir: PathBuf,

    /// Script and asset tree
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// Narrative-text tree
    #[serde(default = "default_story_dir")]
    pub story_dir: PathBuf,

    /// Root for substituted output files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory receiving the extracted record lists
    #[serde(default = "default_extracted_dir")]
    pub extracted_dir: PathBuf,

    /// Name of the engine-wide constants file parsed with the global grammar
    #[serde(default = "default_globals_file")]
    pub globals_file: String,

    /// Extension of script files
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// Extension of narrative-text files
    #[serde(default = "default_story_extension")]
    pub story_extension: String,

    /// Extension given to substituted binary assets
    #[serde(default = "default_binary_output_extension")]
    pub binary_output_extension: String,

    /// Encoding of the source-language text stored inside binary assets
    #[serde(default = "default_binary_source_encoding")]
    pub binary_source_encoding: String,

    /// Width used when reflowing translations
    #[serde(default = "default_chunk_width")]
    pub chunk_width: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Encoding for which translations are reflowed to the renderer's box width
pub const PRIMARY_ENCODING: &str = "gb2312";

fn default_encoding() -> String {
    PRIMARY_ENCODING.to_string()
}

fn default_translations_dir() -> PathBuf {
    PathBuf::from("utf8")
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("Assets")
}

fn default_story_dir() -> PathBuf {
    PathBuf::from("Stories")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Output")
}

fn default_extracted_dir() -> PathBuf {
    PathBuf::from("Extracted")
}

fn default_globals_file() -> String {
    "globals.bsl".to_string()
}

fn default_script_extension() -> String {
    "bsl".to_string()
}

fn default_story_extension() -> String {
    "txt".to_string()
}

fn default_binary_output_extension() -> String {
    "gam".to_string()
}

fn default_binary_source_encoding() -> String {
    "windows-1252".to_string()
}

fn default_chunk_width() -> usize {
    24 // suits CJK glyph widths in the stock dialogue box
}

impl Config {
    /// Load a configuration file, or create one with defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to open config file {:?}: {}", path, e))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;
            Ok((config, false))
        } else {
            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)?;
            std::fs::write(path, config_json)
                .map_err(|e| anyhow!("Failed to write default config to {:?}: {}", path, e))?;
            Ok((config, true))
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        TextCodec::for_label(&self.encoding)?;
        TextCodec::for_label(&self.binary_source_encoding)?;

        if self.chunk_width == 0 {
            return Err(anyhow!("Chunk width must be greater than zero"));
        }

        for (name, ext) in [
            ("script_extension", &self.script_extension),
            ("story_extension", &self.story_extension),
            ("binary_output_extension", &self.binary_output_extension),
        ] {
            if ext.trim().is_empty() {
                return Err(anyhow!("Configuration value '{}' must not be empty", name));
            }
        }

        Ok(())
    }

    /// Whether translations should be reflowed for the target encoding
    pub fn chunking_enabled(&self) -> bool {
        self.encoding.eq_ignore_ascii_case(PRIMARY_ENCODING)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            encoding: default_encoding(),
            translations_dir: default_translations_dir(),
            asset_dir: default_asset_dir(),
            story_dir: default_story_dir(),
            output_dir: default_output_dir(),
            extracted_dir: default_extracted_dir(),
            globals_file: default_globals_file(),
            script_extension: default_script_extension(),
            story_extension: default_story_extension(),
            binary_output_extension: default_binary_output_extension(),
            binary_source_encoding: default_binary_source_encoding(),
            chunk_width: default_chunk_width(),
            log_level: LogLevel::default(),
        }
    }
}
