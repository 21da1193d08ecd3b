//! # Application State
//!
//! Configuration read from the environment and the shared state handed to
//! every route handler.

use std::path::PathBuf;
use std::sync::Arc;

use geofence_engine::{load_snapshot, GeofenceEngine, InMemoryZoneRepository, SnapshotError};
use thiserror::Error;

use crate::middleware::metrics::ApiMetrics;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Invalid server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEOFENCE_PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("GEOFENCE_LOG_FORMAT must be \"text\" or \"json\", got {0:?}")]
    InvalidLogFormat(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port (`GEOFENCE_PORT`, default 8080).
    pub port: u16,
    /// Zone snapshot to load at start-up (`GEOFENCE_ZONES_PATH`).
    pub zones_path: Option<PathBuf>,
    /// Whether `/metrics` and the metrics middleware are mounted
    /// (`GEOFENCE_METRICS_ENABLED`, default true).
    pub metrics_enabled: bool,
    /// Log format (`GEOFENCE_LOG_FORMAT`, default text).
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            zones_path: None,
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of an
    /// environment variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("GEOFENCE_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let zones_path = lookup("GEOFENCE_ZONES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        // Anything other than "false" keeps metrics on.
        let metrics_enabled = lookup("GEOFENCE_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        let log_format = match lookup("GEOFENCE_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") => defaults.log_format,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(v) => return Err(ConfigError::InvalidLogFormat(v.to_string())),
        };

        Ok(Self {
            port,
            zones_path,
            metrics_enabled,
            log_format,
        })
    }
}

/// Shared application state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repository: Arc<InMemoryZoneRepository>,
    pub engine: GeofenceEngine<Arc<InMemoryZoneRepository>>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// State over an empty repository with default configuration.
    pub fn new() -> Self {
        Self::with_repository(AppConfig::default(), InMemoryZoneRepository::new())
    }

    /// State over an already-populated repository.
    pub fn with_repository(config: AppConfig, repository: InMemoryZoneRepository) -> Self {
        let repository = Arc::new(repository);
        Self {
            config,
            engine: GeofenceEngine::new(Arc::clone(&repository)),
            repository,
            metrics: ApiMetrics::new(),
        }
    }

    /// Build state from configuration, loading the zone snapshot if one is
    /// configured.
    ///
    /// # Errors
    ///
    /// Any [`SnapshotError`] from reading or validating the snapshot.
    pub fn from_config(config: AppConfig) -> Result<Self, SnapshotError> {
        let repository = match &config.zones_path {
            Some(path) => InMemoryZoneRepository::from_snapshot(load_snapshot(path)?)?,
            None => {
                tracing::warn!("GEOFENCE_ZONES_PATH not set; every delivery check will fail closed");
                InMemoryZoneRepository::new()
            }
        };
        Ok(Self::with_repository(config, repository))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.zones_path.is_none());
        assert!(config.metrics_enabled);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEOFENCE_PORT", "9090"),
            ("GEOFENCE_ZONES_PATH", "/etc/geofence/zones.yaml"),
            ("GEOFENCE_METRICS_ENABLED", "FALSE"),
            ("GEOFENCE_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.zones_path,
            Some(PathBuf::from("/etc/geofence/zones.yaml"))
        );
        assert!(!config.metrics_enabled);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("GEOFENCE_PORT", "http")])),
            Err(ConfigError::InvalidPort(_))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("GEOFENCE_LOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn empty_state_has_no_tenants() {
        let state = AppState::new();
        assert_eq!(state.repository.tenant_count(), 0);
    }
}
