//! TMDB API response types and request parameters.
//!
//! Every field the live API may omit is optional or defaulted, so a sparse
//! payload never turns into a decode error.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Placeholder title used when neither `title` nor `name` is present.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

// --- Pagination ---

/// Paginated envelope shared by `search/multi` and `trending/*`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchResult<T> {
    /// Current page number (1-based).
    #[serde(default = "first_page")]
    pub page: u32,
    /// Items on this page, in ranking order.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results across all pages.
    #[serde(default)]
    pub total_results: u32,
}

const fn first_page() -> u32 {
    1
}

impl<T> SearchResult<T> {
    /// Returns `true` when the page number is consistent with the totals.
    ///
    /// An empty result set is always consistent; otherwise the page must
    /// satisfy `1 <= page <= total_pages`.
    #[must_use]
    pub const fn is_page_in_range(&self) -> bool {
        self.total_results == 0 || (self.page >= 1 && self.page <= self.total_pages)
    }

    /// Returns `true` if another page can be requested.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page number to request next, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        if self.has_next_page() {
            self.page.checked_add(1)
        } else {
            None
        }
    }
}

// --- Summaries ---

/// Kind of a catalog entry as reported by search and trending listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film.
    Movie,
    /// TV series.
    Tv,
    /// Cast or crew member.
    Person,
    /// Any kind this client does not know about.
    #[serde(other)]
    Unknown,
}

impl MediaKind {
    /// Detail endpoint matching this kind; `None` for people and unknown kinds.
    #[must_use]
    pub const fn detail_type(self) -> Option<MediaType> {
        match self {
            Self::Movie => Some(MediaType::Movie),
            Self::Tv => Some(MediaType::Tv),
            Self::Person | Self::Unknown => None,
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry from `search/multi` or `trending/all/*`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSummary {
    /// TMDB ID (unique per kind, not across kinds).
    pub id: u64,
    /// Entry kind.
    #[serde(default)]
    pub media_type: Option<MediaKind>,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Series or person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original series name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Profile image path (people only).
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Movie release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Series first air date (YYYY-MM-DD).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Adult flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
}

impl MediaSummary {
    /// Title for display: `title`, then `name`, then a fixed placeholder.
    #[must_use]
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref(), self.name.as_deref())
    }

    /// Release or first air date, ignoring empty strings.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref()).or_else(|| non_empty(self.first_air_date.as_deref()))
    }

    /// Year part of [`Self::release_date`].
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date().and_then(parse_year)
    }
}

// --- Details ---

/// Locally-assigned tag telling which detail endpoint produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Resolved through `movie/{id}`.
    Movie,
    /// Resolved through `tv/{id}`.
    Tv,
}

impl MediaType {
    /// Path segment used by TMDB and by the player embed URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Tv => "TV Show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extended record from `movie/{id}` or `tv/{id}` with embedded credits and videos.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDetails {
    /// TMDB ID.
    pub id: u64,
    /// Which endpoint resolved this record. Never sent by TMDB.
    #[serde(skip)]
    pub media_type: Option<MediaType>,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Series name.
    #[serde(default)]
    pub name: Option<String>,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original series name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Movie release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Series first air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Movie runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Typical episode run times in minutes (series).
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_run_time: Vec<u32>,
    /// Genres.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<TmdbGenre>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Spoken languages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub spoken_languages: Vec<TmdbSpokenLanguage>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Adult flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    /// Status (e.g., "Released", "Returning Series").
    #[serde(default)]
    pub status: Option<String>,
    /// Number of seasons (series).
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    /// Number of episodes (series).
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    /// Embedded credits (`append_to_response=credits`).
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    /// Embedded videos (`append_to_response=videos`).
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

impl MediaDetails {
    /// Title for display: `title`, then `name`, then `"Unknown Title"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref(), self.name.as_deref())
    }

    /// Release or first air date, ignoring empty strings.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref()).or_else(|| non_empty(self.first_air_date.as_deref()))
    }

    /// Year part of [`Self::release_date`].
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date().and_then(parse_year)
    }

    /// Vote average with one decimal, or `"N/A"` when unrated.
    #[must_use]
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(avg) if avg > 0.0 => format!("{avg:.1}"),
            _ => String::from("N/A"),
        }
    }

    /// Movie runtime, falling back to the first episode run time.
    #[must_use]
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|r| *r > 0)
            .or_else(|| self.episode_run_time.first().copied())
            .filter(|r| *r > 0)
    }

    /// `"TV Show"` for series, `"Movie"` otherwise.
    #[must_use]
    pub fn media_label(&self) -> &'static str {
        self.media_type.unwrap_or(MediaType::Movie).label()
    }

    /// First YouTube trailer among the embedded videos.
    #[must_use]
    pub fn trailer(&self) -> Option<&TmdbVideo> {
        self.videos.as_ref()?.results.iter().find(|v| {
            v.site.as_deref() == Some("YouTube") && v.video_type.as_deref() == Some("Trailer")
        })
    }

    /// Directors listed in the embedded crew.
    pub fn directors(&self) -> impl Iterator<Item = &TmdbCrewMember> {
        self.credits
            .iter()
            .flat_map(|c| c.crew.iter())
            .filter(|m| m.job.as_deref() == Some("Director"))
    }
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSpokenLanguage {
    /// ISO 639-1 code.
    #[serde(default)]
    pub iso_639_1: Option<String>,
    /// English name.
    #[serde(default)]
    pub english_name: Option<String>,
    /// Native name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Embedded credits block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    /// Cast in billing order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<TmdbCastMember>,
    /// Crew.
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<TmdbCrewMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A single crew credit.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job (e.g., "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department (e.g., "Directing").
    #[serde(default)]
    pub department: Option<String>,
}

/// Embedded videos block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    /// Video entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TmdbVideo>,
}

/// A single video entry (trailer, teaser, clip).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Site-specific key (YouTube video ID).
    pub key: String,
    /// Video name.
    #[serde(default)]
    pub name: Option<String>,
    /// Hosting site (e.g., "YouTube").
    #[serde(default)]
    pub site: Option<String>,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub video_type: Option<String>,
    /// Whether the video is official.
    #[serde(default)]
    pub official: Option<bool>,
}

impl TmdbVideo {
    /// Watch URL for YouTube-hosted videos.
    #[must_use]
    pub fn youtube_url(&self) -> Option<String> {
        (self.site.as_deref() == Some("YouTube"))
            .then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// Parameters for `search/multi` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMultiParams {
    /// Search query, passed through as-is (may be empty).
    pub query: String,
    /// Result page (default: 1).
    pub page: u32,
}

impl SearchMultiParams {
    /// Creates new search params for the first page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Time window of the trending listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendingWindow {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    #[default]
    Week,
}

impl TrendingWindow {
    /// Path segment for `trending/all/{window}`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

// --- Helpers ---

/// Decodes an explicit `null` as the type's default, like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn display_title<'a>(title: Option<&'a str>, name: Option<&'a str>) -> &'a str {
    non_empty(title).or_else(|| non_empty(name)).unwrap_or(UNKNOWN_TITLE)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn parse_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}
