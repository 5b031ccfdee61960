//! API client library for cinefind.
//!
//! Provides the TMDB client, detail resolution for ids of unknown kind, and
//! image/player URL helpers.

/// TMDB API client.
pub mod tmdb;

/// Image and player URL construction.
pub mod urls;
