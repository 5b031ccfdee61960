//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints (multi-search,
//! trending, movie and TV details) and resolves ids of unknown kind.

mod api;
mod client;
mod error;
mod resolve;
mod session;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{TmdbStatusError, status_of};
pub use resolve::{Resolution, fetch_details, resolve_details};
pub use session::SearchSession;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    MediaDetails, MediaKind, MediaSummary, MediaType, SearchMultiParams, SearchResult,
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbErrorResponse, TmdbGenre,
    TmdbSpokenLanguage, TmdbVideo, TmdbVideos, TrendingWindow, UNKNOWN_TITLE,
};
