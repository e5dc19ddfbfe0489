use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Key/value configuration source
///
/// A snapshot of the process environment taken at construction. Values can be
/// overridden with [`ConfigService::set`], which is how tests configure a server
/// without touching the real environment.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// An empty source; every lookup falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a value with `FromStr`, returning `None` when the key is unset.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| AppError::Config {
                    key: key.to_string(),
                    message: format!("'{}': {}", raw, e),
                }),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                _ => Err(AppError::Config {
                    key: key.to_string(),
                    message: format!("'{}' is not a boolean", raw),
                }),
            },
        }
    }
}

/// How new user ids are assigned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IdStrategy {
    /// Monotonic counter that never hands out the same id twice.
    #[default]
    Sequence,
    /// `len + 1` at creation time. Can collide once records are deleted.
    Length,
}

/// Settings for the HTTP server and the record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub id_strategy: IdStrategy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: true,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl ServerConfig {
    /// Build from `HOST`, `PORT`, `DEBUG` and `ID_STRATEGY`.
    pub fn from_service(service: &ConfigService) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: service.get_or("HOST", &defaults.host),
            port: service.get_parsed("PORT")?.unwrap_or(defaults.port),
            debug: service.get_bool("DEBUG")?.unwrap_or(defaults.debug),
            id_strategy: service
                .get_parsed("ID_STRATEGY")?
                .unwrap_or(defaults.id_strategy),
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "userdesk=debug,tower_http=debug"
        } else {
            "userdesk=info,tower_http=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_service(&ConfigService::new()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr(), "127.0.0.1:5000");
        assert!(config.debug);
        assert_eq!(config.id_strategy, IdStrategy::Sequence);
    }

    #[test]
    fn test_overrides() {
        let service = ConfigService::new();
        service.set("HOST", "0.0.0.0");
        service.set("PORT", "8080");
        service.set("DEBUG", "off");
        service.set("ID_STRATEGY", "Length");

        let config = ServerConfig::from_service(&service).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert!(!config.debug);
        assert_eq!(config.id_strategy, IdStrategy::Length);
        assert_eq!(config.log_filter(), "userdesk=info,tower_http=info");
    }

    #[test]
    fn test_invalid_port() {
        let service = ConfigService::new();
        service.set("PORT", "eighty");
        let err = ServerConfig::from_service(&service).unwrap_err();
        assert!(matches!(err, AppError::Config { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_invalid_bool_and_strategy() {
        let service = ConfigService::new();
        service.set("DEBUG", "maybe");
        assert!(ServerConfig::from_service(&service).is_err());

        let service = ConfigService::new();
        service.set("ID_STRATEGY", "random");
        assert!(ServerConfig::from_service(&service).is_err());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(IdStrategy::Sequence.to_string(), "sequence");
        assert_eq!(IdStrategy::Length.to_string(), "length");
    }
}
