//! # Server Configuration
//!
//! Layered configuration for the HTTP server. Later layers win:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config path`)
//! 3. Environment (`MARQUEE_HOST`, `MARQUEE_PORT`, `MARQUEE_CORS_ORIGINS`,
//!    `MARQUEE_POPULAR_COUNT`)
//! 4. CLI flags, applied by the `serve` command
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 9000
//! cors_origins = ["https://films.example.com"]
//! popular_default_count = 5
//! ```

use marquee_core::CatalogError;
use marquee_core::primitives::DEFAULT_TOP_COUNT;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_HOST: &str = "MARQUEE_HOST";
pub const ENV_PORT: &str = "MARQUEE_PORT";
pub const ENV_CORS_ORIGINS: &str = "MARQUEE_CORS_ORIGINS";
pub const ENV_POPULAR_COUNT: &str = "MARQUEE_POPULAR_COUNT";

/// Maximum accepted config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Effective server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means localhost only, `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Count used by `/films/popular` when the request has none.
    pub popular_default_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            popular_default_count: DEFAULT_TOP_COUNT,
        }
    }
}

impl ServerConfig {
    /// Defaults, then the file (if any), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Read a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            CatalogError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CatalogError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded config file {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CatalogError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment values. `lookup` abstracts `std::env::var` for tests.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| CatalogError::Config(format!("{ENV_PORT}: invalid port '{port}'")))?;
        }
        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(count) = lookup(ENV_POPULAR_COUNT) {
            self.popular_default_count = count.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{ENV_POPULAR_COUNT}: invalid count '{count}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.host.trim().is_empty() {
            return Err(CatalogError::Config("host must not be empty".to_string()));
        }
        if self.popular_default_count == 0 {
            return Err(CatalogError::Config(
                "popular_default_count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.popular_default_count, 10);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ServerConfig::from_toml_str("port = 9000").expect("parse");
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ServerConfig::from_toml_str("prot = 9000").expect_err("typo");
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn zero_popular_count_is_rejected() {
        assert!(ServerConfig::from_toml_str("popular_default_count = 0").is_err());
    }

    #[test]
    fn file_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "host = \"0.0.0.0\"\ncors_origins = [\"*\"]").expect("write");

        let config = ServerConfig::from_file(file.path()).expect("load");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ServerConfig::from_file(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn env_overrides_file() {
        let base = ServerConfig::from_toml_str("port = 9000\npopular_default_count = 3")
            .expect("parse");
        let config = base
            .apply_env(env(&[
                (ENV_PORT, "7000"),
                (ENV_CORS_ORIGINS, "http://a.test, http://b.test,"),
            ]))
            .expect("env");

        assert_eq!(config.port, 7000);
        assert_eq!(config.popular_default_count, 3);
        assert_eq!(
            config.cors_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn bad_env_values_are_rejected() {
        assert!(
            ServerConfig::default()
                .apply_env(env(&[(ENV_PORT, "eighty")]))
                .is_err()
        );
        assert!(
            ServerConfig::default()
                .apply_env(env(&[(ENV_POPULAR_COUNT, "-1")]))
                .is_err()
        );
    }
}
