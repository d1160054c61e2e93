//! Server configuration loaded from a TOML file.
//!
//! Every field has a default so an empty file yields a runnable local setup:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! request_timeout_secs = 30
//! cors_origins = ["http://localhost:5173"]
//!
//! [database]
//! url = "postgres://taskboard@localhost/taskboard"
//! pool_size = 8
//!
//! [logging]
//! filter = "taskboard=info,tower_http=info"
//! ```

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`Config`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            request_timeout_secs: 30,
            cors_origins: vec!["http://localhost:5173".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Returns `host:port` for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Relational store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://taskboard@localhost/taskboard".to_owned(),
            pool_size: 8,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "taskboard=info,tower_http=info".to_owned(),
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Relational store settings.
    pub database: DatabaseConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when [`Self::validate`] fails.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be opened, plus any
    /// error from [`Self::from_toml`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = read_config_file(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Rejects values the server cannot start with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty database URL or when the
    /// port, request timeout or pool size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be non-zero",
            ));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::Invalid("database.pool_size must be non-zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use camino::Utf8PathBuf;
    use rstest::rstest;

    #[rstest]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").expect("defaults are valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
    }

    #[rstest]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://app@db/tasks"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.database.url, "postgres://app@db/tasks");
        assert_eq!(config.database.pool_size, 8);
    }

    #[rstest]
    #[case("[database]\nurl = \"  \"", "database.url must not be empty")]
    #[case("[server]\nport = 0", "server.port must be non-zero")]
    #[case(
        "[server]\nrequest_timeout_secs = 0",
        "server.request_timeout_secs must be non-zero"
    )]
    #[case("[database]\npool_size = 0", "database.pool_size must be non-zero")]
    fn unusable_values_are_rejected(#[case] text: &str, #[case] reason: &str) {
        let result = Config::from_toml(text);
        assert!(matches!(result, Err(ConfigError::Invalid(message)) if message == reason));
    }

    #[rstest]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::from_toml("[server\nport = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[rstest]
    fn load_reads_file_from_disk() {
        let dir = std::env::temp_dir().join(format!("taskboard-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("temp dir created");
        let path = Utf8PathBuf::from_path_buf(dir.join("taskboard.toml"))
            .expect("temp path is UTF-8");
        std::fs::write(&path, "[logging]\nfilter = \"debug\"\n").expect("config written");

        let config = Config::load(&path).expect("config loads");
        std::fs::remove_dir_all(&dir).expect("temp dir removed");

        assert_eq!(config.logging.filter, "debug");
    }

    #[rstest]
    fn load_reports_missing_file() {
        let result = Config::load(camino::Utf8Path::new("/nonexistent/taskboard.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
