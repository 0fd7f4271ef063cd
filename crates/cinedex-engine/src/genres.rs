//! Genre Directory: read-only genre reference data for filter UIs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use cinedex_api::tmdb::{Genre, LocalCatalogApi};
use tokio::sync::watch;
use tracing::instrument;

/// Observable genre directory state.
#[derive(Debug, Clone, Default)]
pub struct GenreSnapshot {
    /// Loaded genre catalog (empty until the first successful load).
    pub genres: Vec<Genre>,
    /// True while a load is in flight.
    pub loading: bool,
    /// Message of the latest failed load.
    pub error: Option<String>,
}

/// Loads and exposes the full genre catalog.
///
/// Each `load` call re-fetches; callers that want memoization hold on to
/// the snapshot themselves. A failed load keeps the previous catalog.
#[derive(Debug)]
pub struct GenreDirectory<C> {
    api: C,
    state: Mutex<GenreSnapshot>,
    tx: watch::Sender<GenreSnapshot>,
}

impl<C: LocalCatalogApi> GenreDirectory<C> {
    /// Creates a directory over the given catalog API.
    pub fn new(api: C) -> Self {
        let (tx, _rx) = watch::channel(GenreSnapshot::default());
        Self {
            api,
            state: Mutex::new(GenreSnapshot::default()),
            tx,
        }
    }

    fn state(&self) -> MutexGuard<'_, GenreSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<GenreSnapshot> {
        self.tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GenreSnapshot {
        self.state().clone()
    }

    /// Returns the loaded genres.
    #[must_use]
    pub fn genres(&self) -> Vec<Genre> {
        self.state().genres.clone()
    }

    /// Looks up a genre name by ID.
    #[must_use]
    pub fn name_of(&self, genre_id: u32) -> Option<String> {
        self.state()
            .genres
            .iter()
            .find(|g| g.id == genre_id)
            .map(|g| g.name.clone())
    }

    /// Fetches the genre catalog, publishing loading/error around the call.
    ///
    /// Safe to call multiple times; every call re-fetches.
    #[instrument(skip_all)]
    pub async fn load(&self) {
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
            self.tx.send_replace(state.clone());
        }

        let outcome = self.api.movie_genres().await;

        let mut state = self.state();
        state.loading = false;
        match outcome {
            Ok(list) => state.genres = list.genres,
            Err(error) => {
                tracing::warn!(error = %error, "genre load failed");
                state.error = Some(error.to_string());
            }
        }
        self.tx.send_replace(state.clone());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicU32, Ordering};

    use anyhow::{Result, anyhow, bail};
    use cinedex_api::tmdb::{DiscoverParams, GenreList, MovieDetails, MoviePage, SearchParams};

    use super::*;

    /// Mock that serves a fixed genre list, failing after `fail_after` calls.
    struct FixedGenres {
        genres: Vec<Genre>,
        calls: AtomicU32,
        fail_after: u32,
    }

    impl FixedGenres {
        fn new(genres: Vec<Genre>, fail_after: u32) -> Self {
            Self {
                genres,
                calls: AtomicU32::new(0),
                fail_after,
            }
        }
    }

    impl LocalCatalogApi for FixedGenres {
        async fn movie_genres(&self) -> Result<GenreList> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.fail_after {
                return Err(anyhow!("TMDB API error (HTTP 503)"));
            }
            Ok(GenreList {
                genres: self.genres.clone(),
            })
        }

        async fn discover_movies(&self, _params: &DiscoverParams) -> Result<MoviePage> {
            bail!("not scripted")
        }

        async fn search_movies(&self, _params: &SearchParams) -> Result<MoviePage> {
            bail!("not scripted")
        }

        async fn movie_details(&self, _movie_id: u64) -> Result<MovieDetails> {
            bail!("not scripted")
        }
    }

    fn sample_genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 28,
                name: String::from("Action"),
            },
            Genre {
                id: 878,
                name: String::from("Science Fiction"),
            },
        ]
    }

    #[tokio::test]
    async fn test_load_populates_directory() {
        // Arrange
        let directory = GenreDirectory::new(FixedGenres::new(sample_genres(), u32::MAX));

        // Act
        directory.load().await;

        // Assert
        let snapshot = directory.snapshot();
        assert_eq!(snapshot.genres.len(), 2);
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(directory.name_of(878).as_deref(), Some("Science Fiction"));
        assert!(directory.name_of(99).is_none());
    }

    #[tokio::test]
    async fn test_reload_refetches_every_call() {
        // Arrange
        let directory = GenreDirectory::new(FixedGenres::new(sample_genres(), u32::MAX));

        // Act
        directory.load().await;
        directory.load().await;

        // Assert
        assert_eq!(directory.api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_genres() {
        // Arrange: first call succeeds, second fails
        let directory = GenreDirectory::new(FixedGenres::new(sample_genres(), 1));
        directory.load().await;

        // Act
        directory.load().await;

        // Assert
        let snapshot = directory.snapshot();
        assert_eq!(snapshot.genres.len(), 2);
        assert!(snapshot.error.as_deref().unwrap().contains("503"));
        assert!(!snapshot.loading);
    }
}
