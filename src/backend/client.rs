use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{
    errors::{BackendError, BackendResult},
    types::WordNode,
};
use crate::config::Config;

/// Read-only view of the ucc backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Names of the packages that can be opened, in backend order
    async fn fetch_packages(&self) -> BackendResult<Vec<String>>;

    /// Top-level words of the current package with their descendants
    async fn fetch_words(&self) -> BackendResult<Vec<WordNode>>;
}

/// Backend reached over HTTP
///
/// Every AJAX handler on the server reads a `data` query parameter holding a
/// JSON payload, so requests always carry one even when it is empty.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    words_path: String,
    packages_path: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> BackendResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            words_path: config.words_path.clone(),
            packages_path: config.packages_path.clone(),
        })
    }

    fn endpoint(&self, path: &str, payload: &serde_json::Value) -> BackendResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", path, e)))?;
        url.query_pairs_mut()
            .append_pair("data", &payload.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let url = self.endpoint(path, &serde_json::json!({}))?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| BackendError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_packages(&self) -> BackendResult<Vec<String>> {
        let packages: Vec<String> = self.get_json(&self.packages_path).await?;
        debug!("Fetched {} packages", packages.len());
        Ok(packages)
    }

    async fn fetch_words(&self) -> BackendResult<Vec<WordNode>> {
        let words: Vec<WordNode> = self.get_json(&self.words_path).await?;
        debug!("Fetched {} top-level words", words.len());
        Ok(words)
    }
}
