//! API boundary: one request per catalog list.

use std::future::Future;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use acad_model::{Level, Modality, RawExamCatalog, Region, Source, Specialty};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Source of the catalog lists.
///
/// Each list is fetched by its own request so that callers can await them
/// independently.
pub trait CatalogApi: Send + Sync {
    fn fetch_exam_catalog(&self) -> impl Future<Output = Result<Vec<RawExamCatalog>>> + Send;
    fn fetch_sources(&self) -> impl Future<Output = Result<Vec<Source>>> + Send;
    fn fetch_modalities(&self) -> impl Future<Output = Result<Vec<Modality>>> + Send;
    fn fetch_levels(&self) -> impl Future<Output = Result<Vec<Level>>> + Send;
    fn fetch_specialties(&self) -> impl Future<Output = Result<Vec<Specialty>>> + Send;
    fn fetch_regions(&self) -> impl Future<Output = Result<Vec<Region>>> + Send;

    /// Sources whose name contains `query`, ignoring case.
    fn search_sources(&self, query: &str) -> impl Future<Output = Result<Vec<Source>>> + Send {
        let query = query.trim().to_lowercase();
        async move {
            let sources = self.fetch_sources().await?;
            Ok(sources
                .into_iter()
                .filter(|source| source.name.to_lowercase().contains(&query))
                .collect())
        }
    }
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: reqwest::Client,
    config: StoreConfig,
}

impl HttpCatalogApi {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            StoreError::Config {
                path: None,
                message: format!("invalid user_agent: {e}"),
            }
        })?;
        headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| StoreError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.config.endpoint_url(endpoint)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl CatalogApi for HttpCatalogApi {
    async fn fetch_exam_catalog(&self) -> Result<Vec<RawExamCatalog>> {
        self.get_json(&self.config.endpoints.exam_catalog).await
    }

    async fn fetch_sources(&self) -> Result<Vec<Source>> {
        self.get_json(&self.config.endpoints.sources).await
    }

    async fn fetch_modalities(&self) -> Result<Vec<Modality>> {
        self.get_json(&self.config.endpoints.modalities).await
    }

    async fn fetch_levels(&self) -> Result<Vec<Level>> {
        self.get_json(&self.config.endpoints.levels).await
    }

    async fn fetch_specialties(&self) -> Result<Vec<Specialty>> {
        self.get_json(&self.config.endpoints.specialties).await
    }

    async fn fetch_regions(&self) -> Result<Vec<Region>> {
        self.get_json(&self.config.endpoints.regions).await
    }
}
