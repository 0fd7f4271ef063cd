//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{DiscoverParams, SearchParams};
use super::types::{GenreList, MovieDetails, MoviePage};

/// Movie catalog API trait.
///
/// Abstracts the TMDB endpoints for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches the full movie genre catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_genres(&self) -> Result<GenreList>;

    /// Browses the catalog with server-side filtering and sorting.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverParams) -> Result<MoviePage>;

    /// Searches movies by free-text query.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, params: &SearchParams) -> Result<MoviePage>;

    /// Fetches one movie's extended record with appended credits and videos.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;
}
