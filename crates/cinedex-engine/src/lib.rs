//! Discovery state engine for cinedex.
//!
//! Owns filter criteria, pagination, and the observable result state over
//! the TMDB catalog API. Also provides the genre directory and the
//! movie-details loader with trailer extraction.
//!
//! All components publish their state through [`tokio::sync::watch`]
//! channels; observers subscribe and recompute derived values on read.

mod details;
mod discovery;
mod filters;
mod genres;

pub use details::{DetailsLoader, DetailsSnapshot, trailer_key};
pub use discovery::{DiscoveryEngine, DiscoverySnapshot};
pub use filters::{FilterUpdate, Filters, SortBy};
pub use genres::{GenreDirectory, GenreSnapshot};
