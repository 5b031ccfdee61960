//! Image and player URL construction.
//!
//! Nothing here touches the network: image URLs are joined from the TMDB
//! image host, a size token and the path returned in a summary or detail
//! record.

use crate::tmdb::MediaType;

/// TMDB image host including the `/t/p` prefix.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Default poster size.
pub const DEFAULT_POSTER_SIZE: &str = "w500";

/// Default backdrop size.
pub const DEFAULT_BACKDROP_SIZE: &str = "w1280";

/// Local placeholder served when a title has no poster.
pub const POSTER_PLACEHOLDER: &str = "/placeholder-movie.jpg";

/// Local placeholder served when a title has no backdrop.
pub const BACKDROP_PLACEHOLDER: &str = "/placeholder-backdrop.jpg";

/// Base URL of the embedded video player.
pub const PLAYER_BASE_URL: &str = "https://vidsrc.to/embed";

/// Builds a poster (or any image) URL.
///
/// Returns [`POSTER_PLACEHOLDER`] when `path` is absent or empty, otherwise
/// `{IMAGE_BASE_URL}/{size}{path}` with `path` copied verbatim.
#[must_use]
pub fn image_url(path: Option<&str>, size: &str) -> String {
    join_image(path, size, POSTER_PLACEHOLDER)
}

/// Builds a backdrop URL. Same contract as [`image_url`] with
/// [`BACKDROP_PLACEHOLDER`] as fallback.
#[must_use]
pub fn backdrop_url(path: Option<&str>, size: &str) -> String {
    join_image(path, size, BACKDROP_PLACEHOLDER)
}

/// Builds the player embed URL for a resolved title.
#[must_use]
pub fn embed_url(media_type: MediaType, id: u64) -> String {
    format!("{PLAYER_BASE_URL}/{media_type}/{id}")
}

fn join_image(path: Option<&str>, size: &str, placeholder: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}/{size}{p}"),
        _ => String::from(placeholder),
    }
}
