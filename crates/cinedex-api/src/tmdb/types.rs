//! TMDB API response types.

use serde::Deserialize;

// --- Movie Pages ---

/// A page of movie results from `discover/movie` or `search/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages reported by the server (may exceed the
    /// API's fetchable limit of 500).
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A single movie as listed in a result page.
///
/// Records are immutable once fetched; a new page replaces them wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title (absent on TV-like entries).
    #[serde(default)]
    pub title: Option<String>,
    /// Alternate name used by TV-like entries.
    #[serde(default)]
    pub name: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (`YYYY-MM-DD` or absent).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    /// Returns the display title, falling back to the alternate name
    /// for TV-like entries.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

// --- Genres ---

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// Full genre catalog.
    pub genres: Vec<Genre>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Movie Details ---

/// Response from `movie/{id}` with `append_to_response=credits,videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (`YYYY-MM-DD` or absent).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Full genre entries (not just IDs).
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Appended credits.
    #[serde(default)]
    pub credits: Option<Credits>,
    /// Appended video listing.
    #[serde(default)]
    pub videos: Option<VideoList>,
}

/// Cast and crew credits appended to movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct Credits {
    /// Cast members in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A single crew credit.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g. "Director").
    #[serde(default)]
    pub job: Option<String>,
}

/// Video listing appended to movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    /// Videos in server order.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// A single video entry (trailer, teaser, clip, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    /// Platform-specific video key.
    pub key: String,
    /// Video title.
    #[serde(default)]
    pub name: Option<String>,
    /// Hosting site (e.g. "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub kind: String,
    /// Official upload flag.
    #[serde(default)]
    pub official: bool,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    pub success: bool,
}
