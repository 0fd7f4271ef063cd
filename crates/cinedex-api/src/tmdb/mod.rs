//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB v3 REST API and retrieves
//! movie, genre, and video data.

mod api;
mod client;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use params::{DiscoverParams, SearchParams};
pub use types::{
    CastMember, Credits, CrewMember, Genre, GenreList, MovieDetails, MoviePage, MovieSummary,
    TmdbErrorResponse, Video, VideoList,
};
