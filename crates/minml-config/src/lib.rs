use minml_engine::transform::{
    EntityTransformer, MatcherTransformer, QuoteTransformer, Transformer,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "MINML_CONFIG";

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
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Xml,
    Minml,
}

/// How unmatched matchers in text are escaped before writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherEscape {
    #[default]
    None,
    Numeric,
    Minml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    /// Expand named references such as `[amp]` and `[-->]`.
    pub entities: bool,
    /// Turn `'[...]` and `"[...]` into curly quotes.
    pub quotes: bool,
    pub escape_matchers: MatcherEscape,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            entities: true,
            quotes: true,
            escape_matchers: MatcherEscape::None,
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

    /// `$MINML_CONFIG` if set, otherwise `~/.config/minml/config.toml`.
    pub fn config_path() -> PathBuf {
        Self::config_path_from(std::env::var(CONFIG_ENV).ok())
    }

    fn config_path_from(override_path: Option<String>) -> PathBuf {
        if let Some(path) = override_path.filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            return Self::expand_path(&path).unwrap_or(path);
        }
        let config_dir = shellexpand::tilde("~/.config/minml");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// The transformers this configuration asks for, in the order they
    /// run. Matcher escaping comes last so that it also covers matchers
    /// produced by entity expansion.
    pub fn transformers(&self) -> Vec<Box<dyn Transformer>> {
        let mut transformers: Vec<Box<dyn Transformer>> = Vec::new();
        if self.entities {
            transformers.push(Box::new(EntityTransformer));
        }
        if self.quotes {
            transformers.push(Box::new(QuoteTransformer));
        }
        match self.escape_matchers {
            MatcherEscape::None => {}
            MatcherEscape::Numeric => transformers.push(Box::new(MatcherTransformer::default())),
            MatcherEscape::Minml => transformers.push(Box::new(MatcherTransformer::minml())),
        }
        transformers
    }
}
