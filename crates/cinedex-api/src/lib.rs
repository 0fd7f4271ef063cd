//! API client library for cinedex.
//!
//! Provides a client for the TMDB v3 API (movie discovery, search,
//! genre list, and single-movie details).

/// TMDB API client.
pub mod tmdb;
