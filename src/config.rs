use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "review_normalizer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory for rotated JSON log files; console only when unset
    pub log_dir: Option<PathBuf>,
    pub metrics_enabled: bool,
    pub cors_allow_any_origin: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_dir: None,
            metrics_enabled: true,
            cors_allow_any_origin: true,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply `REVIEW_NORMALIZER_*` overrides (and the conventional `PORT`)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("REVIEW_NORMALIZER_HOST") {
            self.host = host;
        }
        for key in ["PORT", "REVIEW_NORMALIZER_PORT"] {
            if let Some(value) = lookup(key) {
                self.port = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                })?;
            }
        }
        if let Some(dir) = lookup("REVIEW_NORMALIZER_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = lookup("REVIEW_NORMALIZER_METRICS") {
            self.metrics_enabled = parse_bool("REVIEW_NORMALIZER_METRICS", &value)?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "host".to_string(),
                value: self.host.clone(),
            })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
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
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.socket_addr().unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
        assert!(config.metrics_enabled);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9100\nlog_dir = \"/tmp/reviews\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/reviews")));
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("REVIEW_NORMALIZER_HOST", "127.0.0.1"),
                ("PORT", "3000"),
                ("REVIEW_NORMALIZER_PORT", "3001"),
                ("REVIEW_NORMALIZER_METRICS", "off"),
            ]))
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        // service-specific variable wins over PORT
        assert_eq!(config.port, 3001);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: 'eighty'");
    }
}
