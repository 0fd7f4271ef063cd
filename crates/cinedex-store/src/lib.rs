//! Durable storage for cinedex.
//!
//! Uses `rusqlite` (bundled `SQLite`) as a key-value backing store for
//! the persisted favorites set.

mod connection;
/// Favorites map with snapshot write-through.
pub mod favorites;
mod kv;
mod migrations;

#[allow(clippy::module_name_repetitions)]
pub use connection::open_store;
pub use favorites::{FavoriteRecord, FavoritesStore};
