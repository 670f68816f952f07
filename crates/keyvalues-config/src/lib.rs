use keyvalues_syntax::Limits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid limits in config file at {config_path}: {field} must be greater than zero")]
    InvalidLimits {
        config_path: PathBuf,
        field: &'static str,
    },
}

/// Buffer bounds as written in the `[limits]` table. Missing entries take
/// the parser defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_line_length: usize,
    pub max_key_length: usize,
    pub max_value_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Limits::default().into()
    }
}

impl From<Limits> for LimitsConfig {
    fn from(limits: Limits) -> Self {
        Self {
            max_line_length: limits.max_line_length,
            max_key_length: limits.max_key_length,
            max_value_length: limits.max_value_length,
        }
    }
}

impl From<LimitsConfig> for Limits {
    fn from(config: LimitsConfig) -> Self {
        Self {
            max_line_length: config.max_line_length,
            max_key_length: config.max_key_length,
            max_value_length: config.max_value_length,
        }
    }
}

impl LimitsConfig {
    /// Name of the first limit set to zero, if any.
    fn zero_field(&self) -> Option<&'static str> {
        [
            ("max_line_length", self.max_line_length),
            ("max_key_length", self.max_key_length),
            ("max_value_length", self.max_value_length),
        ]
        .into_iter()
        .find_map(|(name, value)| (value == 0).then_some(name))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for relative document paths given to the CLI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_path: Option<PathBuf>,
    /// Default log filter, e.g. `warn` or `debug`. `RUST_LOG` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub limits: LimitsConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(field) = config.limits.zero_field() {
            return Err(ConfigError::InvalidLimits {
                config_path: config_path.to_path_buf(),
                field,
            });
        }

        // Expand shell variables and tilde in the documents directory
        config.documents_path = config
            .documents_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/keyvalues");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn limits(&self) -> Limits {
        self.limits.into()
    }

    /// Resolve a document path given on the command line. Absolute paths
    /// and paths without a configured documents directory are used as is.
    pub fn resolve_document(&self, path: &Path) -> PathBuf {
        match &self.documents_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
