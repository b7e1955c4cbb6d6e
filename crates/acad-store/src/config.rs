//! Store configuration.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! base_url = "https://api.example.edu/v1"
//! timeout_secs = 15
//!
//! [endpoints]
//! sources = "/fuentes/activas"
//! ```

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default delay before a search request is issued.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

const DEFAULT_USER_AGENT: &str = concat!("acad-catalog/", env!("CARGO_PKG_VERSION"));

/// Endpoint paths relative to [`StoreConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub exam_catalog: String,
    pub sources: String,
    pub modalities: String,
    pub levels: String,
    pub specialties: String,
    pub regions: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            exam_catalog: "/catalogo/examenes".to_string(),
            sources: "/fuentes".to_string(),
            modalities: "/modalidades".to_string(),
            levels: "/niveles".to_string(),
            specialties: "/especialidades".to_string(),
            regions: "/regiones".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            endpoints: Endpoints::default(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| StoreError::Config {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|err| match err {
            StoreError::Config { message, .. } => StoreError::Config {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;
        tracing::info!("Loaded store configuration from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.endpoint_url("/")?;
        if self.timeout_secs == 0 {
            return Err(StoreError::Config {
                path: None,
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Absolute URL for an endpoint path. The base URL's own path is kept.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| StoreError::InvalidUrl {
            url: joined.clone(),
            message: e.to_string(),
        })
    }
}
