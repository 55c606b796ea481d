// Configuration file handling

use crate::filter::Filter;
use chrono::format::{Item, StrftimeItems};
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How views are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// chrono strftime pattern for displayed due dates
    pub date_format: String,
    pub color: bool,
    /// Filter selected when a session starts
    pub default_filter: Filter,
    pub output: OutputFormat,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: crate::models::DATE_INPUT_FORMAT.to_string(),
            color: true,
            default_filter: Filter::All,
            output: OutputFormat::Text,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// `<config dir>/tasklist/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasklist").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path when it exists
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_format.is_empty() {
            return Err(eyre!("date_format cannot be empty"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(eyre!("Invalid date_format: {:?}", self.date_format));
        }
        Ok(())
    }
}
