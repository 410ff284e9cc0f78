use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading and validating the converter settings.
/// Every field has a default, so a partial or missing file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Extension given to derived output paths
    #[serde(default = "default_extension")]
    pub extension: String,

    // @field: Inserted before the extension when output would overwrite input
    #[serde(default = "default_collision_suffix")]
    pub collision_suffix: String,

    // @field: Line terminator written after every SRT line
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            collision_suffix: default_collision_suffix(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Line terminator used in the SRT output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    // @ending: Unix style
    #[default]
    Lf,
    // @ending: Windows style
    Crlf,
}

impl LineEnding {
    // @returns: Terminator characters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

// Implement FromStr trait for LineEnding
impl std::str::FromStr for LineEnding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lf" => Ok(Self::Lf),
            "crlf" => Ok(Self::Crlf),
            _ => Err(anyhow!("Invalid line ending: {}", s)),
        }
    }
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

fn default_extension() -> String {
    "srt".to_string()
}

fn default_collision_suffix() -> String {
    "_out".to_string()
}

impl Config {
    /// Load the configuration file, or the defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let extension = &self.output.extension;
        if extension.is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }
        if extension.contains(['.', '/', '\\']) {
            return Err(anyhow!("Output extension must not contain dots or path separators: {}", extension));
        }

        if self.output.collision_suffix.is_empty() {
            return Err(anyhow!("Collision suffix must not be empty"));
        }
        if self.output.collision_suffix.contains(['/', '\\']) {
            return Err(anyhow!("Collision suffix must not contain path separators: {}", self.output.collision_suffix));
        }

        Ok(())
    }
}
