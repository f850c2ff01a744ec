//! Configuration for Seriph clients.
//!
//! Explicit values, page `<meta>` tags, and an optional TOML file are
//! resolved into a [`SeriphConfig`]. [`FileVisitorStore`] keeps the
//! anonymous visitor token across restarts.

mod meta;
mod visitor;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use seriph_api::{SeriphClient, SeriphConfig};
use seriph_core::CoreError;

pub use meta::{ENDPOINT_META, HtmlMetaReader, MetaConfig, MetaConfigReader, SITE_KEY_META};
pub use visitor::FileVisitorStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no site key configured (pass one explicitly or add a seriph-site-key meta tag)")]
    MissingSiteKey,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<seriph_api::Error> for ConfigError {
    fn from(err: seriph_api::Error) -> Self {
        match err {
            seriph_api::Error::Validation { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },
            other => Self::Validation {
                field: "endpoint".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CoreError::Validation { field, reason },
            ConfigError::MissingSiteKey => CoreError::Validation {
                field: "site_key".into(),
                reason: "a site key is required".into(),
            },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}

// ── Resolution ──────────────────────────────────────────────────────

/// Explicitly supplied values. Blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub site_key: Option<String>,
    pub endpoint: Option<String>,
}

impl PartialConfig {
    pub fn site_key(site_key: impl Into<String>) -> Self {
        Self {
            site_key: Some(site_key.into()),
            endpoint: None,
        }
    }
}

/// Merge explicit values with an ambient source: explicit values win,
/// the reader fills gaps. A missing site key is an error; a missing
/// endpoint falls back to the hosted default.
pub fn resolve_config(
    explicit: PartialConfig,
    meta: Option<&dyn MetaConfigReader>,
) -> Result<SeriphConfig, ConfigError> {
    let ambient = meta.and_then(|m| m.read()).unwrap_or_default();

    let site_key = non_blank(explicit.site_key)
        .or_else(|| non_blank(ambient.site_key))
        .ok_or(ConfigError::MissingSiteKey)?;
    let endpoint = non_blank(explicit.endpoint).or_else(|| non_blank(ambient.endpoint));

    let config = SeriphConfig { site_key, endpoint };
    config.validate()?;
    debug!(endpoint = config.endpoint(), "resolved seriph config");
    Ok(config)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── TOML config file ────────────────────────────────────────────────

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileConfig {
    pub site_key: Option<String>,

    /// Self-hosted endpoint; the hosted default when absent.
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            site_key: None,
            endpoint: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl FileConfig {
    pub fn partial(&self) -> PartialConfig {
        PartialConfig {
            site_key: self.site_key.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a client from this file, filling gaps from `meta`, with the
    /// visitor token persisted in the platform data directory when one
    /// exists.
    pub fn client(&self, meta: Option<&dyn MetaConfigReader>) -> Result<SeriphClient, ConfigError> {
        let config = resolve_config(self.partial(), meta)?;
        let mut builder = SeriphClient::builder(config).timeout(self.timeout());
        if let Some(store) = FileVisitorStore::in_data_dir() {
            builder = builder.visitor_store(Arc::new(store));
        }
        Ok(builder.build()?)
    }
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("xyz", "seriph", "seriph").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("seriph");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the config file at the canonical path.
pub fn load_config() -> Result<FileConfig, ConfigError> {
    load_config_from(&config_path())
}

/// Load `path` over built-in defaults. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = Figment::new()
        .merge(Serialized::defaults(FileConfig::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &FileConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
