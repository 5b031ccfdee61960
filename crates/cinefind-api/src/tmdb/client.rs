//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::TmdbStatusError;
use super::types::{
    MediaDetails, MediaSummary, SearchMultiParams, SearchResult, TmdbErrorResponse, TrendingWindow,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Sub-resources embedded in every detail request.
const DETAIL_APPEND: &str = "credits,videos";

/// TMDB API client.
///
/// Holds no state between calls: every method is one GET round trip with no
/// retry, timeout or cache.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// v3 API key, sent as the `api_key` query parameter.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with the API key and query params and decodes the
    /// JSON body.
    ///
    /// Non-success statuses become a [`TmdbStatusError`] inside the returned
    /// error chain.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        // The URL carries the API key, so only the caller's params are logged.
        tracing::debug!(?query, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(body, |e| {
                format!("code={}, message={}", e.status_code, e.status_message)
            });
            tracing::debug!(%status, %message, "TMDB API error response");
            return Err(TmdbStatusError { status, message }.into());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

/// Logs pagination envelopes that break `1 <= page <= total_pages`.
fn check_pagination(path: &str, result: &SearchResult<MediaSummary>) {
    if !result.is_page_in_range() {
        tracing::warn!(
            path,
            page = result.page,
            total_pages = result.total_pages,
            total_results = result.total_results,
            "TMDB returned a page outside the reported range"
        );
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_multi(
        &self,
        params: &SearchMultiParams,
    ) -> Result<SearchResult<MediaSummary>> {
        let query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
            ("include_adult", String::from("false")),
        ];

        let result = self.get_json("search/multi", &query).await?;
        check_pagination("search/multi", &result);
        Ok(result)
    }

    #[instrument(skip_all)]
    async fn trending(
        &self,
        window: TrendingWindow,
        page: u32,
    ) -> Result<SearchResult<MediaSummary>> {
        let path = format!("trending/all/{}", window.as_str());
        let query = [("page", page.to_string())];

        let result = self.get_json(&path, &query).await?;
        check_pagination(&path, &result);
        Ok(result)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<MediaDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("append_to_response", String::from(DETAIL_APPEND))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64) -> Result<MediaDetails> {
        let path = format!("tv/{series_id}");
        let query = [("append_to_response", String::from(DETAIL_APPEND))];
        self.get_json(&path, &query).await
    }
}
