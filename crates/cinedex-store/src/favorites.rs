//! Persisted favorites map with full-snapshot write-through.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::kv;

/// Key holding the whole serialized favorites map.
const FAVORITES_KEY: &str = "favorites";

/// A trimmed movie projection persisted independently of live results,
/// so favorites survive after movies scroll out of the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Vote average at the time of favoriting.
    #[serde(default)]
    pub vote_average: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// Favorites membership backed by the kv table.
///
/// The whole map is written back through on every mutation. Persistence
/// failures are logged and swallowed: favorites are best-effort user
/// convenience state, not critical data.
#[derive(Debug)]
pub struct FavoritesStore {
    conn: Connection,
    map: HashMap<u64, FavoriteRecord>,
}

impl FavoritesStore {
    /// Opens the store, seeding the map from the persisted snapshot.
    ///
    /// Absent or malformed content falls back soft to an empty map.
    #[must_use]
    pub fn open(conn: Connection) -> Self {
        let map = match kv::get(&conn, FAVORITES_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|error| {
                tracing::warn!(%error, "malformed favorites snapshot, starting empty");
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read favorites snapshot, starting empty");
                HashMap::new()
            }
        };
        Self { conn, map }
    }

    /// Flips membership for the given record.
    ///
    /// Returns the new membership state (`true` if the movie is now a
    /// favorite). Two toggles in a row restore the original membership.
    pub fn toggle(&mut self, record: FavoriteRecord) -> bool {
        let id = record.id;
        let added = if self.map.contains_key(&id) {
            self.map.remove(&id);
            false
        } else {
            self.map.insert(id, record);
            true
        };
        self.persist();
        added
    }

    /// Membership lookup, no side effect.
    #[must_use]
    pub fn has(&self, movie_id: u64) -> bool {
        self.map.contains_key(&movie_id)
    }

    /// Snapshot of the current membership.
    ///
    /// Order follows the underlying map and is not guaranteed stable
    /// across reloads; presentation re-sorts if order matters.
    #[must_use]
    pub fn list(&self) -> Vec<FavoriteRecord> {
        self.map.values().cloned().collect()
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no favorites are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Empties the map.
    pub fn clear(&mut self) {
        self.map.clear();
        self.persist();
    }

    /// Writes the whole map back through to the kv key.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.map) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize favorites snapshot");
                return;
            }
        };
        if let Err(error) = kv::put(&self.conn, FAVORITES_KEY, &json) {
            tracing::warn!(%error, "failed to persist favorites snapshot");
        }
    }
}
