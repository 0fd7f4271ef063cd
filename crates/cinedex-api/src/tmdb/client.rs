//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::params::{DiscoverParams, SearchParams};
use super::types::{GenreList, MovieDetails, MoviePage, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language sent with every request.
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Response language attached to every request.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            language: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth and query params.
    ///
    /// The fixed `language` parameter is appended to every request.
    /// There is no retry policy: each call is a single attempt and
    /// non-2xx responses surface as errors carrying status and body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .query(&[("language", self.language.as_str())])
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalCatalogApi for TmdbClient {
    #[instrument(skip_all)]
    async fn movie_genres(&self) -> Result<GenreList> {
        self.get_json("genre/movie/list", &[]).await
    }

    #[instrument(skip_all)]
    async fn discover_movies(&self, params: &DiscoverParams) -> Result<MoviePage> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("sort_by", params.sort_by.clone()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(genre_id) = params.with_genres {
            query.push(("with_genres", genre_id.to_string()));
        }
        if let Some(year) = params.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }

        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, params: &SearchParams) -> Result<MoviePage> {
        let query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("append_to_response", String::from("credits,videos"))];
        self.get_json(&path, &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_builder_requires_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_token is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_token("test-token").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_with_required_fields_succeeds() {
        // Arrange & Act
        let result = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build();

        // Assert
        assert!(result.is_ok());
        assert_eq!(result.unwrap().language, "en-US");
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3/").unwrap();

        // Act
        let client = TmdbClient::builder()
            .base_url(custom_url.clone())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[test]
    fn test_parse_genre_list_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/genre_list.json");

        // Act
        let list: GenreList = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!list.genres.is_empty());
        assert!(
            list.genres
                .iter()
                .any(|g| g.id == 878 && g.name == "Science Fiction")
        );
    }

    #[test]
    fn test_parse_discover_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/discover_movies.json");

        // Act
        let page: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert!(!page.results.is_empty());
        assert!(page.total_pages > 500);
        let first = &page.results[0];
        assert!(first.id > 0);
        assert!(!first.display_title().is_empty());
    }

    #[test]
    fn test_parse_search_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");

        // Act
        let page: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert!(!page.results.is_empty());
        let dune = page.results.iter().find(|m| m.id == 438_631).unwrap();
        assert_eq!(dune.display_title(), "Dune");
        assert_eq!(dune.release_date.as_deref(), Some("2021-09-15"));
        assert!(dune.genre_ids.contains(&878));
    }

    #[test]
    fn test_parse_search_movie_empty_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        // Act
        let page: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_438631.json");

        // Act
        let details: MovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 438_631);
        assert_eq!(details.title.as_deref(), Some("Dune"));
        assert!(details.runtime.is_some());
        let credits = details.credits.unwrap();
        assert!(!credits.cast.is_empty());
        let videos = details.videos.unwrap();
        assert!(videos.results.iter().any(|v| v.kind == "Trailer"));
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(!error.success);
        assert!(error.status_message.contains("Invalid API key"));
    }

    /// Builds a client against a wiremock server.
    fn mock_client(mock_server: &wiremock::MockServer) -> TmdbClient {
        let base_url = format!("{}/3/", mock_server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_movie_genres_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/genre_list.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/genre/movie/list"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let list = client.movie_genres().await.unwrap();

        // Assert
        assert!(list.genres.iter().any(|g| g.name == "Action"));
    }

    #[tokio::test]
    async fn test_discover_movies_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/discover_movies.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/discover/movie"))
            .and(wiremock::matchers::query_param("page", "2"))
            .and(wiremock::matchers::query_param("sort_by", "vote_average.desc"))
            .and(wiremock::matchers::query_param("with_genres", "878"))
            .and(wiremock::matchers::query_param("primary_release_year", "2021"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);
        let params = DiscoverParams::new()
            .page(2)
            .sort_by("vote_average.desc")
            .with_genres(878)
            .primary_release_year(2021);

        // Act
        let page = client.discover_movies(&params).await.unwrap();

        // Assert
        assert!(!page.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_movies_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "dune"))
            .and(wiremock::matchers::query_param("page", "1"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);
        let params = SearchParams::new("dune");

        // Act
        let page = client.search_movies(&params).await.unwrap();

        // Assert
        assert!(page.results.iter().any(|m| m.id == 438_631));
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_details_438631.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/438631"))
            .and(wiremock::matchers::query_param(
                "append_to_response",
                "credits,videos",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let details = client.movie_details(438_631).await.unwrap();

        // Assert
        assert_eq!(details.id, 438_631);
        assert_eq!(details.title.as_deref(), Some("Dune"));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("my-secret-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        let params = SearchParams::new("test");

        // Act & Assert (mock expect(1) verifies Authorization header)
        client.search_movies(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_returns_tmdb_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);
        let params = SearchParams::new("test");

        // Act
        let result = client.search_movies(&params).await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_http_error_with_non_json_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(503).set_body_string("upstream unavailable"),
            )
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.movie_genres().await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("503"));
        assert!(err.contains("upstream unavailable"));
    }
}
