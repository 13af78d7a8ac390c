//! HTTP profile-source client.
//!
//! Provides async HTTP access to the academic-profile API with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Injected rate-limit delays (search vs census endpoints)
//! - Response caching with TTL

use std::collections::HashMap;
use std::time::Duration;

use async_stream::try_stream;
use futures::stream::BoxStream;
use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;

use crate::config::{SourceConfig, api};
use crate::error::{SourceError, SourceResult};
use crate::models::RawProfileRecord;

use super::ProfileSource;

/// One page of candidate profiles from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePage {
    /// Total matching profiles.
    #[serde(default)]
    pub total: i64,

    /// Current offset in the result set.
    #[serde(default)]
    pub offset: i64,

    /// Next offset if more results are available.
    #[serde(default)]
    pub next: Option<i64>,

    /// Profiles in this page.
    #[serde(default)]
    pub data: Vec<RawProfileRecord>,
}

impl CandidatePage {
    /// Check if there are more results available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Co-publication census payload.
#[derive(Debug, Clone, Default, Deserialize)]
struct CensusListing {
    #[serde(default)]
    data: Vec<CoAuthorCount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoAuthorCount {
    name: String,
    #[serde(default)]
    co_publications: i64,
}

/// HTTP client for the academic-profile API.
#[derive(Clone)]
pub struct HttpProfileSource {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// API key (optional).
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// Delay before each candidate-search request.
    rate_limit_delay: Duration,

    /// Delay before each co-publication census request.
    census_rate_limit_delay: Duration,
}

impl HttpProfileSource {
    /// Create a new source client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: SourceConfig) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/json".parse().expect("valid accept header"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            api_key: config.api_key,
            base_url: config.base_url,
            rate_limit_delay: config.rate_limit_delay,
            census_rate_limit_delay: config.census_rate_limit_delay,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch one page of candidate profiles.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn fetch_candidate_page(
        &self,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> SourceResult<CandidatePage> {
        let url = format!("{}/researchers/search", self.base_url);

        let params = vec![
            ("query".to_string(), keyword.to_string()),
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        self.get(&url, &params, self.rate_limit_delay).await
    }

    /// Make a GET request with caching and a pre-request rate-limit delay.
    async fn get<T>(
        &self,
        url: &str,
        params: &[(String, String)],
        delay: Duration,
    ) -> SourceResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Check cache
        let cache_key = Self::cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return serde_json::from_value(cached).map_err(SourceError::from);
        }

        // Rate limit
        tokio::time::sleep(delay).await;

        let response = self.client.get(url).query(params).send().await?;

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        // Cache response
        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(SourceError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> SourceResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(SourceError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

#[async_trait::async_trait]
impl ProfileSource for HttpProfileSource {
    fn fetch_candidates<'a>(
        &'a self,
        keyword: &'a str,
    ) -> BoxStream<'a, SourceResult<RawProfileRecord>> {
        Box::pin(try_stream! {
            let mut offset = 0;
            loop {
                let page = self
                    .fetch_candidate_page(keyword, offset, api::PAGE_SIZE)
                    .await?;
                let next = page.next;

                for record in page.data {
                    yield record;
                }

                match next {
                    Some(n) => offset = n,
                    None => break,
                }
            }
        })
    }

    async fn fetch_co_publications(
        &self,
        researcher_id: &str,
    ) -> SourceResult<HashMap<String, i64>> {
        let url = format!("{}/researchers/{}/co-publications", self.base_url, researcher_id);
        let params: Vec<(String, String)> = vec![];

        let listing: CensusListing =
            self.get(&url, &params, self.census_rate_limit_delay).await?;

        Ok(listing.data.into_iter().map(|c| (c.name, c.co_publications)).collect())
    }
}

impl std::fmt::Debug for HttpProfileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProfileSource")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
