use log::debug;
use markdown_vault_syntax::{ConfigureError, MarkdownParser, extensions};
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

    #[error("Unknown extension {0:?}")]
    UnknownExtension(String),

    #[error(transparent)]
    Configure(#[from] ConfigureError),
}

/// Which dialect extensions a vault uses.
///
/// ```toml
/// extensions = ["comment", "hashtag", "internal-link"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "all_extensions")]
    pub extensions: Vec<String>,
}

fn all_extensions() -> Vec<String> {
    extensions::names().map(str::to_string).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: all_extensions(),
        }
    }
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

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        debug!(
            "Loaded config from {} with extensions {:?}",
            config_path.display(),
            config.extensions
        );
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
        let config_dir = shellexpand::tilde("~/.config/markdown-vault");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Build a parser with the enabled extensions.
    ///
    /// Extensions are applied in their canonical order whatever order the
    /// file lists them in, so two configs naming the same set produce the
    /// same rule order.
    pub fn parser(&self) -> Result<MarkdownParser, ConfigError> {
        if let Some(unknown) = self
            .extensions
            .iter()
            .find(|name| extensions::by_name(name).is_none())
        {
            return Err(ConfigError::UnknownExtension(unknown.clone()));
        }
        let enabled: Vec<_> = extensions::all()
            .into_iter()
            .filter(|ext| self.extensions.iter().any(|name| name == ext.name))
            .collect();
        Ok(MarkdownParser::default().configure(&enabled)?)
    }
}
