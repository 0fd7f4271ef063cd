//! Movie Details Loader: reactive single-movie fetch and trailer derivation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cinedex_api::tmdb::{LocalCatalogApi, MovieDetails, Video};
use tokio::sync::watch;
use tracing::instrument;

/// Reference video platform used for trailer derivation.
const TRAILER_SITE: &str = "YouTube";

/// Derives the trailer key from a video listing.
///
/// Two-tier fallback: the first YouTube entry of type "Trailer" wins;
/// failing that, the first YouTube entry of any type; failing that,
/// nothing. Any clip beats no clip, but an actual trailer beats a clip.
#[must_use]
pub fn trailer_key(videos: &[Video]) -> Option<&str> {
    videos
        .iter()
        .find(|v| v.site == TRAILER_SITE && v.kind == "Trailer")
        .or_else(|| videos.iter().find(|v| v.site == TRAILER_SITE))
        .map(|v| v.key.as_str())
}

/// Observable details-loader state.
#[derive(Debug, Clone, Default)]
pub struct DetailsSnapshot {
    /// Currently selected movie ID.
    pub movie_id: Option<u64>,
    /// Extended record of the last successfully loaded movie.
    pub data: Option<MovieDetails>,
    /// True while a load is in flight.
    pub loading: bool,
    /// Message of the latest failed load.
    pub error: Option<String>,
}

impl DetailsSnapshot {
    /// Trailer key derived from the loaded record, if any.
    #[must_use]
    pub fn trailer_key(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.videos.as_ref())
            .and_then(|v| trailer_key(&v.results))
    }
}

/// Loads one movie's extended record keyed by a changing movie ID.
///
/// Re-fetches whenever the current ID changes to a present value; rapid
/// ID changes are ticket-guarded like the discovery engine so a stale
/// response never overwrites a newer selection.
#[derive(Debug)]
pub struct DetailsLoader<C> {
    api: C,
    state: Mutex<DetailsSnapshot>,
    issued: AtomicU64,
    tx: watch::Sender<DetailsSnapshot>,
}

impl<C: LocalCatalogApi> DetailsLoader<C> {
    /// Creates a loader over the given catalog API.
    pub fn new(api: C) -> Self {
        let (tx, _rx) = watch::channel(DetailsSnapshot::default());
        Self {
            api,
            state: Mutex::new(DetailsSnapshot::default()),
            issued: AtomicU64::new(0),
            tx,
        }
    }

    fn state(&self) -> MutexGuard<'_, DetailsSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<DetailsSnapshot> {
        self.tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DetailsSnapshot {
        self.state().clone()
    }

    /// Changes the selected movie, re-fetching when the ID changes to a
    /// present value. Clearing the ID keeps the last loaded record.
    pub async fn set_movie(&self, movie_id: Option<u64>) {
        {
            let mut state = self.state();
            if state.movie_id == movie_id {
                return;
            }
            state.movie_id = movie_id;
        }
        if let Some(id) = movie_id {
            self.load(id).await;
        }
    }

    /// Re-fetches the currently selected movie, if any.
    pub async fn reload(&self) {
        let movie_id = self.state().movie_id;
        if let Some(id) = movie_id {
            self.load(id).await;
        }
    }

    #[instrument(skip_all)]
    async fn load(&self, movie_id: u64) {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
            self.tx.send_replace(state.clone());
        }

        let outcome = self.api.movie_details(movie_id).await;

        let mut state = self.state();
        if self.issued.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, movie_id, "discarding stale details response");
            return;
        }

        state.loading = false;
        match outcome {
            Ok(details) => state.data = Some(details),
            Err(error) => {
                tracing::warn!(movie_id, error = %error, "details load failed");
                state.error = Some(error.to_string());
            }
        }
        self.tx.send_replace(state.clone());
    }
}
