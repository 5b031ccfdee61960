//! Detail resolution for ids of unknown media type.
//!
//! A watch route only carries a numeric id, and TMDB movie and TV ids live in
//! separate namespaces. Resolution tries the movie endpoint first and only
//! falls back to the TV endpoint after the movie lookup has failed.

use anyhow::Result;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::error::{TmdbStatusError, status_of};
use super::types::{MediaDetails, MediaType};

/// Outcome of [`resolve_details`].
#[derive(Debug)]
#[allow(clippy::large_enum_variant)]
pub enum Resolution {
    /// The id named a movie.
    Movie(MediaDetails),
    /// The movie lookup failed and the id named a TV series.
    Tv(MediaDetails),
    /// Neither lookup succeeded.
    NotFound {
        /// Requested id.
        id: u64,
        /// Error from the TV lookup, the last attempt made.
        last_error: anyhow::Error,
    },
}

impl Resolution {
    /// Resolved media type, `None` when not found.
    #[must_use]
    pub const fn media_type(&self) -> Option<MediaType> {
        match self {
            Self::Movie(_) => Some(MediaType::Movie),
            Self::Tv(_) => Some(MediaType::Tv),
            Self::NotFound { .. } => None,
        }
    }

    /// Borrows the resolved details.
    #[must_use]
    pub const fn details(&self) -> Option<&MediaDetails> {
        match self {
            Self::Movie(d) | Self::Tv(d) => Some(d),
            Self::NotFound { .. } => None,
        }
    }

    /// Converts into a `Result`, collapsing `NotFound` into a single error.
    ///
    /// # Errors
    ///
    /// Returns a "not found" error carrying the last lookup error as its cause.
    pub fn into_details(self) -> Result<MediaDetails> {
        self.into_parts().map(|(_, details)| details)
    }

    /// Like [`Self::into_details`], also returning the resolved media type.
    ///
    /// # Errors
    ///
    /// Returns a "not found" error carrying the last lookup error as its cause.
    pub fn into_parts(self) -> Result<(MediaType, MediaDetails)> {
        match self {
            Self::Movie(d) => Ok((MediaType::Movie, d)),
            Self::Tv(d) => Ok((MediaType::Tv, d)),
            Self::NotFound { id, last_error } => {
                Err(last_error.context(format!("title {id} not found as movie or TV series")))
            }
        }
    }
}

/// Fetches details through the endpoint matching `media_type` and stamps the tag.
///
/// # Errors
///
/// Returns an error if the underlying API request fails.
#[instrument(skip(api))]
pub async fn fetch_details(
    api: &(impl LocalTmdbApi + Sync),
    media_type: MediaType,
    id: u64,
) -> Result<MediaDetails> {
    let mut details = match media_type {
        MediaType::Movie => api.movie_details(id).await?,
        MediaType::Tv => api.tv_details(id).await?,
    };
    details.media_type = Some(media_type);
    Ok(details)
}

/// Resolves an id of unknown kind: movie first, TV only after the movie
/// lookup fails.
///
/// Any movie failure triggers the fallback, transport errors included.
/// The two requests never overlap.
#[instrument(skip(api))]
pub async fn resolve_details(api: &(impl LocalTmdbApi + Sync), id: u64) -> Resolution {
    let movie_err = match fetch_details(api, MediaType::Movie, id).await {
        Ok(details) => {
            tracing::debug!(id, "resolved as movie");
            return Resolution::Movie(details);
        }
        Err(e) => e,
    };

    let not_found = movie_err
        .downcast_ref::<TmdbStatusError>()
        .is_some_and(TmdbStatusError::is_not_found);
    if not_found {
        tracing::debug!(id, "no movie with this id, trying TV");
    } else {
        tracing::warn!(
            id,
            status = ?status_of(&movie_err),
            error = %movie_err,
            "movie lookup failed, trying TV"
        );
    }

    match fetch_details(api, MediaType::Tv, id).await {
        Ok(details) => {
            tracing::debug!(id, "resolved as TV series");
            Resolution::Tv(details)
        }
        Err(tv_err) => {
            tracing::warn!(id, error = %tv_err, "TV lookup failed, title not found");
            Resolution::NotFound {
                id,
                last_error: tv_err,
            }
        }
    }
}
