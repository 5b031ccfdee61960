//! Search session with stale-response suppression.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::types::{MediaSummary, SearchMultiParams, SearchResult};

/// Issues searches on behalf of one input box.
///
/// Every call to [`SearchSession::search`] supersedes the ones before it:
/// a response that arrives after a newer search has started is dropped, so
/// the caller never renders results for a query the user already replaced.
#[derive(Debug)]
pub struct SearchSession<A> {
    api: A,
    generation: AtomicU64,
}

impl<A: LocalTmdbApi + Sync> SearchSession<A> {
    /// Wraps an API implementation.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    /// Runs a multi-search.
    ///
    /// Returns `Ok(None)` when a newer search (or [`Self::clear`]) started
    /// while this one was in flight; errors of superseded searches are
    /// dropped the same way.
    ///
    /// # Errors
    ///
    /// Returns the API error of the current search.
    #[instrument(skip_all, fields(query = %params.query, page = params.page))]
    pub async fn search(
        &self,
        params: &SearchMultiParams,
    ) -> Result<Option<SearchResult<MediaSummary>>> {
        let ticket = self.next_generation();
        let result = self.api.search_multi(params).await;

        if !self.is_current(ticket) {
            tracing::debug!(ticket, "discarding superseded search response");
            return Ok(None);
        }
        result.map(Some)
    }

    /// Invalidates any in-flight search, e.g. when the input is cleared.
    pub fn clear(&self) {
        self.next_generation();
    }

    fn next_generation(&self) -> u64 {
        self.generation
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}
