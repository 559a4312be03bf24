//! triggerd settings.
//!
//! Three layers, later ones winning: built-in defaults, an optional
//! `trigger.toml` in the working directory, then environment variables.
//! A value that is present but unusable is an error, never a silent fallback.

use std::io::ErrorKind;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE: &str = "trigger.toml";

/// Fully resolved daemon settings.
///
/// ```toml
/// bind = "0.0.0.0:8080"
/// database_url = "sqlite:trigger.db?mode=rwc"
/// log_filter = "triggerd=info"
/// ```
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Socket the HTTP server listens on.
    pub bind: SocketAddr,
    /// `SQLite` connection URL handed to sqlx.
    pub database_url: String,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite:trigger.db?mode=rwc".to_string(),
            log_filter: "triggerd=info,trigger=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Resolve settings from `trigger.toml` and the process environment.
    ///
    /// Recognised variables: `TRIGGER_BIND`, `TRIGGER_DATABASE_URL`, and
    /// `TRIGGER_LOG` (falling back to `RUST_LOG`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, if
    /// `TRIGGER_BIND` is not a socket address, or if the result is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = var("TRIGGER_BIND") {
            self.bind = value
                .parse()
                .map_err(|source| ConfigError::InvalidBind { value, source })?;
        }
        if let Some(url) = var("TRIGGER_DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(filter) = var("TRIGGER_LOG").or_else(|| var("RUST_LOG")) {
            self.log_filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.port() == 0 {
            return Err(ConfigError::Validation("bind port must be non-zero"));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Validation("database url must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("TRIGGER_BIND is not a socket address: {value:?}")]
    InvalidBind {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
