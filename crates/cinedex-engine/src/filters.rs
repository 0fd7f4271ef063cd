//! Filter criteria and search-mode post-processing.

use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use cinedex_api::tmdb::MovieSummary;

/// Result ordering.
///
/// In discover mode the server applies it; in search mode the engine
/// re-sorts the fetched page client-side, except for `PopularityDesc`
/// where the search endpoint's native order is already popularity-ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Popularity, most popular first (endpoint native order).
    #[default]
    PopularityDesc,
    /// Vote average, highest first.
    VoteAverageDesc,
    /// Primary release date, newest first.
    ReleaseDateDesc,
    /// Primary release date, oldest first.
    ReleaseDateAsc,
}

impl SortBy {
    /// TMDB wire string for the `sort_by` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PopularityDesc => "popularity.desc",
            Self::VoteAverageDesc => "vote_average.desc",
            Self::ReleaseDateDesc => "primary_release_date.desc",
            Self::ReleaseDateAsc => "primary_release_date.asc",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity.desc" => Ok(Self::PopularityDesc),
            "vote_average.desc" => Ok(Self::VoteAverageDesc),
            "primary_release_date.desc" => Ok(Self::ReleaseDateDesc),
            "primary_release_date.asc" => Ok(Self::ReleaseDateAsc),
            other => bail!("unknown sort order: {other}"),
        }
    }
}

/// User-entered discovery criteria.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Free-text query; empty means "no search" (discover mode).
    pub query: String,
    /// Genre filter.
    pub genre_id: Option<u32>,
    /// Release year filter.
    pub year: Option<i32>,
    /// Result ordering.
    pub sort_by: SortBy,
}

impl Filters {
    /// Returns the trimmed query, or `None` when it is empty
    /// (i.e. the engine is in discover mode).
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// A partial update merged into [`Filters`] field by field.
///
/// Unset fields leave the current value untouched; `genre_id`/`year`
/// carry an inner `Option` so they can also be cleared.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    query: Option<String>,
    genre_id: Option<Option<u32>>,
    year: Option<Option<i32>>,
    sort_by: Option<SortBy>,
}

impl FilterUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets or clears the genre filter.
    #[must_use]
    pub const fn genre_id(mut self, genre_id: Option<u32>) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    /// Sets or clears the year filter.
    #[must_use]
    pub const fn year(mut self, year: Option<i32>) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Merges this update into `filters`.
    pub fn apply(self, filters: &mut Filters) {
        if let Some(query) = self.query {
            filters.query = query;
        }
        if let Some(genre_id) = self.genre_id {
            filters.genre_id = genre_id;
        }
        if let Some(year) = self.year {
            filters.year = year;
        }
        if let Some(sort_by) = self.sort_by {
            filters.sort_by = sort_by;
        }
    }
}

/// Parses a movie's release date, `None` when absent or malformed.
fn release_date(movie: &MovieSummary) -> Option<NaiveDate> {
    movie
        .release_date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Applies client-side narrowing and ordering to a fetched search page.
///
/// The search endpoint accepts no genre/year parameters, so combining a
/// free-text query with those filters means over-fetching the page and
/// narrowing locally. The server-reported totals therefore stay upper
/// bounds on the unfiltered result.
///
/// Order of operations: genre filter, year filter (movies without a
/// parseable release date are excluded once a year filter is active),
/// then sorting. Missing dates sort as earliest for the date orders.
pub(crate) fn refine_search_page(mut movies: Vec<MovieSummary>, filters: &Filters) -> Vec<MovieSummary> {
    if let Some(genre_id) = filters.genre_id {
        movies.retain(|m| m.genre_ids.contains(&genre_id));
    }
    if let Some(year) = filters.year {
        movies.retain(|m| release_date(m).is_some_and(|d| d.year() == year));
    }
    match filters.sort_by {
        SortBy::PopularityDesc => {}
        SortBy::VoteAverageDesc => {
            movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
        }
        SortBy::ReleaseDateDesc => {
            movies.sort_by_key(|m| std::cmp::Reverse(release_date(m).unwrap_or(NaiveDate::MIN)));
        }
        SortBy::ReleaseDateAsc => {
            movies.sort_by_key(|m| release_date(m).unwrap_or(NaiveDate::MIN));
        }
    }
    movies
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn movie(id: u64, date: Option<&str>, vote: f64, genre_ids: &[u32]) -> MovieSummary {
        MovieSummary {
            id,
            title: Some(format!("Movie {id}")),
            name: None,
            overview: None,
            release_date: date.map(String::from),
            poster_path: None,
            backdrop_path: None,
            vote_average: vote,
            popularity: 0.0,
            genre_ids: genre_ids.to_vec(),
        }
    }

    #[test]
    fn test_sort_by_wire_strings_roundtrip() {
        // Arrange
        let all = [
            SortBy::PopularityDesc,
            SortBy::VoteAverageDesc,
            SortBy::ReleaseDateDesc,
            SortBy::ReleaseDateAsc,
        ];

        // Act & Assert
        for sort in all {
            assert_eq!(sort.as_str().parse::<SortBy>().unwrap(), sort);
        }
        assert!("rating.desc".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_search_query_trims_whitespace() {
        // Arrange
        let mut filters = Filters::default();

        // Act & Assert
        assert!(filters.search_query().is_none());
        filters.query = String::from("   ");
        assert!(filters.search_query().is_none());
        filters.query = String::from("  dune ");
        assert_eq!(filters.search_query(), Some("dune"));
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        // Arrange
        let mut filters = Filters {
            query: String::from("dune"),
            genre_id: Some(878),
            year: Some(2021),
            sort_by: SortBy::VoteAverageDesc,
        };

        // Act
        FilterUpdate::new().year(None).apply(&mut filters);

        // Assert
        assert_eq!(filters.query, "dune");
        assert_eq!(filters.genre_id, Some(878));
        assert_eq!(filters.year, None);
        assert_eq!(filters.sort_by, SortBy::VoteAverageDesc);
    }

    #[test]
    fn test_refine_genre_filter() {
        // Arrange
        let movies = vec![
            movie(1, Some("2021-01-01"), 7.0, &[878, 12]),
            movie(2, Some("2021-01-01"), 7.0, &[35]),
            movie(3, Some("2021-01-01"), 7.0, &[12, 878]),
        ];
        let filters = Filters {
            genre_id: Some(878),
            ..Filters::default()
        };

        // Act
        let refined = refine_search_page(movies, &filters);

        // Assert
        let ids: Vec<u64> = refined.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_refine_year_filter_excludes_missing_dates() {
        // Arrange
        let movies = vec![
            movie(1, Some("2021-09-15"), 7.0, &[]),
            movie(2, Some("1984-12-14"), 7.0, &[]),
            movie(3, None, 7.0, &[]),
            movie(4, Some(""), 7.0, &[]),
            movie(5, Some("2021-02-01"), 7.0, &[]),
        ];
        let filters = Filters {
            year: Some(2021),
            ..Filters::default()
        };

        // Act
        let refined = refine_search_page(movies, &filters);

        // Assert
        let ids: Vec<u64> = refined.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_refine_sorts_by_vote_average_desc() {
        // Arrange
        let movies = vec![
            movie(1, None, 6.1, &[]),
            movie(2, None, 8.2, &[]),
            movie(3, None, 7.8, &[]),
        ];
        let filters = Filters {
            sort_by: SortBy::VoteAverageDesc,
            ..Filters::default()
        };

        // Act
        let refined = refine_search_page(movies, &filters);

        // Assert
        let ids: Vec<u64> = refined.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_refine_date_sorts_treat_missing_as_earliest() {
        // Arrange
        let movies = vec![
            movie(1, Some("2021-09-15"), 0.0, &[]),
            movie(2, None, 0.0, &[]),
            movie(3, Some("1984-12-14"), 0.0, &[]),
        ];
        let asc = Filters {
            sort_by: SortBy::ReleaseDateAsc,
            ..Filters::default()
        };
        let desc = Filters {
            sort_by: SortBy::ReleaseDateDesc,
            ..Filters::default()
        };

        // Act
        let ascending = refine_search_page(movies.clone(), &asc);
        let descending = refine_search_page(movies, &desc);

        // Assert
        let asc_ids: Vec<u64> = ascending.iter().map(|m| m.id).collect();
        let desc_ids: Vec<u64> = descending.iter().map(|m| m.id).collect();
        assert_eq!(asc_ids, vec![2, 3, 1]);
        assert_eq!(desc_ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_refine_popularity_keeps_native_order() {
        // Arrange
        let movies = vec![
            movie(9, Some("2020-01-01"), 3.0, &[]),
            movie(4, Some("2024-01-01"), 9.0, &[]),
            movie(7, Some("2022-01-01"), 6.0, &[]),
        ];
        let filters = Filters::default();

        // Act
        let refined = refine_search_page(movies, &filters);

        // Assert
        let ids: Vec<u64> = refined.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9, 4, 7]);
    }
}
