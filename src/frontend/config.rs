use crate::errors::ChainError;
use crate::infrastructure::logging::{LogConfig, LogFormat, LogOutput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

/// Names checked in each directory during discovery, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".typechainrc", ".typechainrc.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this configuration was read from; relative registry paths
    /// resolve against its directory.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_true")]
    pub builtins: bool,

    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rotated log files, relative to the config file;
    /// stderr when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Extra `tracing` directives, e.g. "typechain::core=trace"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            files: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            directory: None,
            filter: None,
        }
    }
}

fn default_true() -> bool { true }
fn default_level() -> String { "warn".to_string() }

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ChainError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ChainError::config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ChainError> {
        toml::from_str(content)
            .map_err(|e| ChainError::config(format!("Failed to parse config: {}", e)))
    }

    /// Find the nearest configuration file from `start` upwards.
    ///
    /// A file that exists but fails to load is an error, not a fallback.
    pub fn discover_from(start: &Path) -> Result<Option<Self>, ChainError> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let config_path = dir.join(name);
                if config_path.is_file() {
                    return Self::load(&config_path).map(Some);
                }
            }

            current = dir.parent().map(|p| p.to_path_buf());
        }

        Ok(None)
    }

    /// Discover from the current directory, falling back to defaults
    pub fn discover() -> Result<Self, ChainError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ChainError::config(format!("Cannot read current directory: {}", e)))?;
        Ok(Self::discover_from(&cwd)?.unwrap_or_default())
    }

    /// Directory relative registry paths are anchored to
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }

    pub fn log_config(&self, verbose: bool) -> Result<LogConfig, ChainError> {
        let level = if verbose {
            Level::DEBUG
        } else {
            Level::from_str(&self.logging.level).map_err(|_| {
                ChainError::config(format!("Invalid log level '{}'", self.logging.level))
            })?
        };

        let output = match &self.logging.directory {
            Some(directory) => {
                let directory = match self.base_dir() {
                    Some(base) => base.join(directory),
                    None => PathBuf::from(directory),
                };
                LogOutput::File {
                    directory: directory.to_string_lossy().into_owned(),
                    prefix: "typechain".to_string(),
                }
            }
            None => LogOutput::Stderr,
        };

        let mut log = LogConfig::new()
            .with_level(level)
            .with_format(self.logging.format)
            .with_output(output)
            .with_span_events(verbose);
        if let Some(filter) = &self.logging.filter {
            log = log.with_filter(filter.clone());
        }
        Ok(log)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ChainError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChainError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| ChainError::config(format!("Failed to write config: {}", e)))
    }
}
