//! Typed error for non-success TMDB responses.

use reqwest::StatusCode;

/// Non-2xx response from the TMDB API.
///
/// Travels inside the `anyhow::Error` chain returned by `TmdbClient`, so
/// callers can recover the status with `err.downcast_ref::<TmdbStatusError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbStatusError {
    /// HTTP status returned by the server.
    pub status: StatusCode,
    /// TMDB `status_message`, or the raw body when it is not a TMDB error payload.
    pub message: String,
}

impl TmdbStatusError {
    /// Returns `true` for HTTP 404, which TMDB uses for ids of the wrong kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

impl std::fmt::Display for TmdbStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TMDB API error (HTTP {}): {}", self.status, self.message)
    }
}

impl std::error::Error for TmdbStatusError {}

/// Returns the HTTP status carried by an error chain, if any.
#[must_use]
pub fn status_of(err: &anyhow::Error) -> Option<StatusCode> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TmdbStatusError>())
        .map(|e| e.status)
}
