//! HTTP client for the WordPress REST API that backs the coupon site.
//!
//! Wraps `reqwest` with status mapping, retry with back-off, an optional
//! short-lived response cache and per-record tolerant deserialization.
//! Typed per-collection operations live in [`queries`].

mod cache;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use dealfront_core::AppConfig;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::CmsError;
use crate::outcome::QueryOutcome;
use crate::query::ContentQuery;
use crate::retry::retry_with_backoff;

use self::cache::ResponseCache;

/// Connection settings for [`CmsClient`].
#[derive(Clone)]
pub struct CmsSettings {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub cache_ttl_secs: u64,
}

impl CmsSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.cms_base_url.clone(),
            auth_token: config.cms_auth_token.clone(),
            timeout_secs: config.cms_request_timeout_secs,
            user_agent: config.cms_user_agent.clone(),
            max_retries: config.cms_max_retries,
            backoff_base_ms: config.cms_retry_backoff_base_ms,
            cache_ttl_secs: config.cms_cache_ttl_secs,
        }
    }

    /// Settings for tests: no retries, no cache.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            auth_token: None,
            timeout_secs: 5,
            user_agent: "dealfront-test/0.1".to_string(),
            max_retries: 0,
            backoff_base_ms: 0,
            cache_ttl_secs: 0,
        }
    }
}

impl std::fmt::Debug for CmsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsSettings")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[redacted]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

/// Client for the content API.
///
/// Cheap to clone: the `reqwest` pool and the response cache are shared.
#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
    cache: ResponseCache,
}

impl CmsClient {
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidBaseUrl`] if the base URL does
    /// not parse as an absolute http(s) URL.
    pub fn with_settings(settings: &CmsSettings) -> Result<Self, CmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        // A single trailing slash makes `Url::join` append collection paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", settings.base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CmsError::InvalidBaseUrl {
            base_url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CmsError::InvalidBaseUrl {
                base_url: settings.base_url.clone(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url,
            auth_token: settings.auth_token.clone(),
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
            cache: ResponseCache::new(Duration::from_secs(settings.cache_ttl_secs)),
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::with_settings`].
    pub fn new(config: &AppConfig) -> Result<Self, CmsError> {
        Self::with_settings(&CmsSettings::from_app_config(config))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the collection URL with percent-encoded query parameters.
    pub(crate) fn build_url(&self, query: &ContentQuery) -> Result<Url, CmsError> {
        let mut url = self
            .base_url
            .join(query.kind.path())
            .map_err(|e| CmsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        let params = query.params();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Fetches a collection and deserializes each record on its own.
    ///
    /// Records that do not match `T` are skipped with a warning so one bad
    /// post does not blank a whole page.
    ///
    /// # Errors
    ///
    /// - [`CmsError::RateLimited`]: HTTP 429 after all retries.
    /// - [`CmsError::NotFound`]: HTTP 404 (not retried).
    /// - [`CmsError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CmsError::Http`]: network or TLS failure after all retries.
    /// - [`CmsError::Deserialize`]: the body is not a JSON array.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        query: &ContentQuery,
    ) -> Result<Vec<T>, CmsError> {
        let url = self.build_url(query)?;
        let body = self.fetch_body(&url).await?;
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
                context: query.describe(),
                source: e,
            })?;

        let total = values.len();
        let records: Vec<T> = values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<T>(v).ok())
            .collect();
        if records.len() < total {
            tracing::warn!(
                query = %query.describe(),
                skipped = total - records.len(),
                total,
                "skipped records that did not match the expected shape"
            );
        }
        Ok(records)
    }

    /// Fetches a collection, normalizes it, and folds failures into a
    /// [`QueryOutcome`] after logging them.
    pub async fn load<T, U>(&self, query: &ContentQuery, normalize: fn(T) -> U) -> QueryOutcome<Vec<U>>
    where
        T: DeserializeOwned,
    {
        match self.fetch_records::<T>(query).await {
            Ok(records) => {
                tracing::debug!(query = %query.describe(), count = records.len(), "content query loaded");
                QueryOutcome::Loaded(records.into_iter().map(normalize).collect())
            }
            Err(error) => {
                tracing::warn!(query = %query.describe(), error = %error, "content query failed");
                QueryOutcome::Failed(error)
            }
        }
    }

    /// Checks that the API root answers with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`CmsError`] for any failure.
    pub async fn ping(&self) -> Result<(), CmsError> {
        let url = self.base_url.clone();
        self.send(&url).await.map(|_| ())
    }

    async fn fetch_body(&self, url: &Url) -> Result<Arc<str>, CmsError> {
        let key = url.as_str();
        if let Some(body) = self.cache.get(key).await {
            tracing::debug!(url = %url, "content API cache hit");
            return Ok(body);
        }

        let body: Arc<str> = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.send(url)
        })
        .await?
        .into();

        self.cache.put(key.to_owned(), Arc::clone(&body)).await;
        Ok(body)
    }

    /// One GET with status mapping; no retry.
    async fn send(&self, url: &Url) -> Result<String, CmsError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CmsError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(CmsError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
