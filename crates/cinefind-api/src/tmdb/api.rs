//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{MediaDetails, MediaSummary, SearchMultiParams, SearchResult, TrendingWindow};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies, TV series and people in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn search_multi(&self, params: &SearchMultiParams)
    -> Result<SearchResult<MediaSummary>>;

    /// Fetches the trending listing for all media types.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending(
        &self,
        window: TrendingWindow,
        page: u32,
    ) -> Result<SearchResult<MediaSummary>>;

    /// Fetches movie details with embedded credits and videos.
    ///
    /// The returned record has no `media_type` tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MediaDetails>;

    /// Fetches TV series details with embedded credits and videos.
    ///
    /// The returned record has no `media_type` tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64) -> Result<MediaDetails>;
}
