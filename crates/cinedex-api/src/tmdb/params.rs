//! Request parameters for the TMDB endpoints.

/// Parameters for the `discover/movie` endpoint.
///
/// Filtering and sorting happen server-side in discover mode.
#[derive(Debug, Clone)]
pub struct DiscoverParams {
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Server-side sort order (TMDB wire string, default: `popularity.desc`).
    pub sort_by: String,
    /// Filter by genre ID.
    pub with_genres: Option<u32>,
    /// Filter by primary release year.
    pub primary_release_year: Option<i32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl DiscoverParams {
    /// Creates discover params with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            sort_by: String::from("popularity.desc"),
            with_genres: None,
            primary_release_year: None,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Sets the genre filter.
    #[must_use]
    pub const fn with_genres(mut self, genre_id: u32) -> Self {
        self.with_genres = Some(genre_id);
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: i32) -> Self {
        self.primary_release_year = Some(year);
        self
    }
}

impl Default for DiscoverParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the `search/movie` endpoint.
///
/// The endpoint accepts no genre/year filter parameters; callers that need
/// them must narrow the returned page themselves.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Free-text search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}
