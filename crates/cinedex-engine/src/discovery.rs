//! Discovery Engine: endpoint selection, pagination, and observable state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cinedex_api::tmdb::{DiscoverParams, LocalCatalogApi, MovieSummary, SearchParams};
use tokio::sync::watch;
use tracing::instrument;

use crate::filters::{FilterUpdate, Filters, refine_search_page};

/// Upstream hard cap on fetchable pages.
const MAX_TOTAL_PAGES: u32 = 500;

/// Observable state published by the engine.
///
/// Always reflects the most recently applied response; a failed fetch
/// keeps the last successful movies/page/totals visible and only fills
/// `error`.
#[derive(Debug, Clone)]
pub struct DiscoverySnapshot {
    /// Current result set, replaced wholesale on every applied page.
    pub movies: Vec<MovieSummary>,
    /// Current page (>= 1, never above `total_pages`).
    pub page: u32,
    /// Total pages, clamped to `[1, 500]`.
    pub total_pages: u32,
    /// True while at least one request is outstanding.
    pub loading: bool,
    /// Message of the latest failed fetch, cleared when a new one starts.
    pub error: Option<String>,
}

impl Default for DiscoverySnapshot {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            error: None,
        }
    }
}

/// Engine-owned mutable state.
#[derive(Debug, Default)]
struct EngineState {
    filters: Filters,
    snapshot: DiscoverySnapshot,
}

/// The discovery engine.
///
/// Decides per fetch whether to hit the search or the discover endpoint,
/// reconciles server paging with client-side narrowing in search mode,
/// and guards against out-of-order completion of concurrent fetches with
/// a monotonically increasing request ticket.
#[derive(Debug)]
pub struct DiscoveryEngine<C> {
    api: C,
    state: Mutex<EngineState>,
    /// Ticket of the most recently issued request.
    issued: AtomicU64,
    tx: watch::Sender<DiscoverySnapshot>,
}

impl<C: LocalCatalogApi> DiscoveryEngine<C> {
    /// Creates an engine over the given catalog API.
    pub fn new(api: C) -> Self {
        let (tx, _rx) = watch::channel(DiscoverySnapshot::default());
        Self {
            api,
            state: Mutex::new(EngineState::default()),
            issued: AtomicU64::new(0),
            tx,
        }
    }

    /// Locks the engine state, recovering from a poisoned lock.
    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<DiscoverySnapshot> {
        self.tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DiscoverySnapshot {
        self.state().snapshot.clone()
    }

    /// Returns a copy of the current filters.
    #[must_use]
    pub fn filters(&self) -> Filters {
        self.state().filters.clone()
    }

    /// Merges the update into the current filters.
    ///
    /// Changing filters never triggers a fetch by itself: callers issue an
    /// explicit `fetch_page(1)` afterwards. This keeps rapid filter edits
    /// from turning into a refetch per keystroke.
    pub fn set_filters(&self, update: FilterUpdate) {
        update.apply(&mut self.state().filters);
    }

    /// Fetches page `page` (clamped to >= 1) for the current filters.
    ///
    /// A non-empty trimmed query selects search mode: the search endpoint
    /// takes only the query and page, and the fetched page is narrowed and
    /// re-sorted client-side. An empty query selects discover mode where
    /// the server applies all filtering and sorting.
    ///
    /// Resolves once the snapshot is updated or the failure is published.
    /// A response whose ticket has been superseded by a later call is
    /// discarded entirely; `loading` clears only when the latest request
    /// settles.
    #[instrument(skip_all)]
    pub async fn fetch_page(&self, page: u32) {
        let page = page.max(1);
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst).wrapping_add(1);

        let filters = {
            let mut state = self.state();
            state.snapshot.loading = true;
            state.snapshot.error = None;
            self.tx.send_replace(state.snapshot.clone());
            state.filters.clone()
        };

        let outcome = if let Some(query) = filters.search_query() {
            let params = SearchParams::new(query).page(page);
            self.api
                .search_movies(&params)
                .await
                .map(|fetched| (refine_search_page(fetched.results, &filters), fetched.total_pages))
        } else {
            let mut params = DiscoverParams::new()
                .page(page)
                .sort_by(filters.sort_by.as_str());
            if let Some(genre_id) = filters.genre_id {
                params = params.with_genres(genre_id);
            }
            if let Some(year) = filters.year {
                params = params.primary_release_year(year);
            }
            self.api
                .discover_movies(&params)
                .await
                .map(|fetched| (fetched.results, fetched.total_pages))
        };

        let mut state = self.state();
        if self.issued.load(Ordering::SeqCst) != ticket {
            // Superseded while in flight; a newer request owns the state now.
            tracing::debug!(ticket, "discarding stale response");
            return;
        }

        state.snapshot.loading = false;
        match outcome {
            Ok((movies, server_total)) => {
                state.snapshot.total_pages = server_total.clamp(1, MAX_TOTAL_PAGES);
                state.snapshot.page = page.min(state.snapshot.total_pages);
                state.snapshot.movies = movies;
            }
            Err(error) => {
                tracing::warn!(page, error = %error, "fetch failed");
                state.snapshot.error = Some(error.to_string());
            }
        }
        self.tx.send_replace(state.snapshot.clone());
    }

    /// Advances one page; no-op (and no request) on the last page.
    pub async fn next(&self) {
        let target = {
            let state = self.state();
            if state.snapshot.page >= state.snapshot.total_pages {
                return;
            }
            state.snapshot.page.saturating_add(1)
        };
        self.fetch_page(target).await;
    }

    /// Goes back one page; no-op (and no request) on the first page.
    pub async fn prev(&self) {
        let target = {
            let state = self.state();
            if state.snapshot.page <= 1 {
                return;
            }
            state.snapshot.page.saturating_sub(1)
        };
        self.fetch_page(target).await;
    }
}
