//! cinedex - movie discovery CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use cinedex_api::tmdb::{LocalCatalogApi, MovieDetails, TmdbClient};
use cinedex_engine::{
    DetailsLoader, DiscoveryEngine, FilterUpdate, GenreDirectory, SortBy,
};
use cinedex_store::{FavoriteRecord, FavoritesStore, open_store};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalog (search or discover).
    Browse(BrowseArgs),
    /// List the movie genre catalog.
    Genres,
    /// Show extended details for a single movie.
    Details(DetailsArgs),
    /// Manage the persisted favorites list.
    Favorites(FavoritesCommand),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Free-text search query. Omit to browse the full catalog.
    #[arg(long)]
    query: Option<String>,

    /// Filter by genre ID (see `genres`).
    #[arg(long)]
    genre: Option<u32>,

    /// Filter by primary release year.
    #[arg(long)]
    year: Option<i32>,

    /// Sort order (e.g. "popularity.desc", "vote_average.desc",
    /// "primary_release_date.desc", "primary_release_date.asc").
    /// Falls back to config, then to "popularity.desc".
    #[arg(long)]
    sort: Option<String>,

    /// Page to fetch.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `favorites` subcommand.
#[derive(clap::Args)]
struct FavoritesCommand {
    /// Favorites subcommand to run.
    #[command(subcommand)]
    command: FavoritesSubcommands,
}

/// Available favorites subcommands.
#[derive(Subcommand)]
enum FavoritesSubcommands {
    /// List favorited movies.
    List,
    /// Toggle a movie in or out of the favorites list.
    Toggle(FavoritesToggleArgs),
    /// Remove all favorites.
    Clear,
}

/// Arguments for the `favorites toggle` subcommand.
#[derive(clap::Args)]
struct FavoritesToggleArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(language) = &config.api.language {
        builder = builder.language(language);
    }
    builder.build().context("failed to build TMDB client")
}

/// Loads the application config for the given directory override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Runs the `browse` subcommand.
///
/// A non-empty `--query` searches by text; otherwise the full catalog is
/// browsed with the genre/year/sort filters applied server-side.
///
/// # Errors
///
/// Returns an error if the sort order is unknown, the client fails to
/// build, or the fetch fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;

    let sort_by = match args.sort.as_deref().or(config.discovery.sort_by.as_deref()) {
        Some(s) => s.parse::<SortBy>()?,
        None => SortBy::default(),
    };

    let client = build_tmdb_client(&config)?;
    let engine = DiscoveryEngine::new(client);
    engine.set_filters(
        FilterUpdate::new()
            .query(args.query.clone().unwrap_or_default())
            .genre_id(args.genre)
            .year(args.year)
            .sort_by(sort_by),
    );
    engine.fetch_page(args.page).await;

    let snapshot = engine.snapshot();
    if let Some(error) = snapshot.error {
        bail!("fetch failed: {error}");
    }

    tracing::info!(
        "Page {}/{}: {} movie(s)",
        snapshot.page,
        snapshot.total_pages,
        snapshot.movies.len()
    );
    tracing::info!("ID\tScore\tRelease\t\tTitle");
    for movie in &snapshot.movies {
        tracing::info!(
            "{}\t{:.1}\t{}\t{}",
            movie.id,
            movie.vote_average,
            movie.release_date.as_deref().filter(|d| !d.is_empty()).unwrap_or("-"),
            movie.display_title(),
        );
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let directory = GenreDirectory::new(client);
    directory.load().await;

    let snapshot = directory.snapshot();
    if let Some(error) = snapshot.error {
        bail!("genre fetch failed: {error}");
    }

    tracing::info!("ID\tName");
    for genre in &snapshot.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", snapshot.genres.len());

    Ok(())
}

/// Maximum cast entries printed by `details`.
const DETAILS_CAST_LIMIT: usize = 5;

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let loader = DetailsLoader::new(client);
    loader.set_movie(Some(args.id)).await;

    let snapshot = loader.snapshot();
    if let Some(error) = snapshot.error {
        bail!("details fetch failed: {error}");
    }
    let details = snapshot.data.as_ref().context("no details loaded")?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title.as_deref().unwrap_or("-"));
    tracing::info!(
        "Release Date: {}",
        details.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Runtime: {}",
        details
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r} min")),
    );
    tracing::info!("Score: {:.1}", details.vote_average);
    let genre_names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genre_names.join(", "));
    tracing::info!(
        "Overview: {}",
        details.overview.as_deref().unwrap_or("-")
    );

    if let Some(credits) = &details.credits {
        if let Some(director) = credits
            .crew
            .iter()
            .find(|c| c.job.as_deref() == Some("Director"))
        {
            tracing::info!("Director: {}", director.name);
        }
        for member in credits.cast.iter().take(DETAILS_CAST_LIMIT) {
            tracing::info!(
                "Cast: {} as {}",
                member.name,
                member.character.as_deref().unwrap_or("-"),
            );
        }
    }

    match snapshot.trailer_key() {
        Some(key) => tracing::info!("Trailer: https://www.youtube.com/watch?v={key}"),
        None => tracing::info!("Trailer: -"),
    }

    Ok(())
}

/// Projects a full details record down to the persisted favorite shape.
fn to_favorite_record(details: &MovieDetails) -> FavoriteRecord {
    FavoriteRecord {
        id: details.id,
        title: details.title.clone().unwrap_or_default(),
        poster_path: details.poster_path.clone(),
        vote_average: details.vote_average,
        genre_ids: details.genres.iter().map(|g| g.id).collect(),
    }
}

/// Runs the `favorites list` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[instrument(skip_all)]
fn run_favorites_list(dir: Option<&PathBuf>) -> Result<()> {
    let conn = open_store(dir).context("failed to open store")?;
    let store = FavoritesStore::open(conn);

    if store.is_empty() {
        tracing::info!("No favorites. Run `favorites toggle --id <ID>` to add one.");
        return Ok(());
    }

    let mut favorites = store.list();
    favorites.sort_by(|a, b| a.title.cmp(&b.title));

    tracing::info!("ID\tScore\tTitle");
    for favorite in &favorites {
        tracing::info!(
            "{}\t{:.1}\t{}",
            favorite.id,
            favorite.vote_average,
            favorite.title,
        );
    }
    tracing::info!("Total: {} favorite(s)", favorites.len());

    Ok(())
}

/// Runs the `favorites toggle` subcommand.
///
/// Fetches the movie's details so the persisted record carries its title
/// and genres even after it scrolls out of any result page.
///
/// # Errors
///
/// Returns an error if the client fails to build, the fetch fails, or
/// the store cannot be opened.
#[instrument(skip_all)]
async fn run_favorites_toggle(args: &FavoritesToggleArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let details = client
        .movie_details(args.id)
        .await
        .context("TMDB movie details request failed")?;
    let record = to_favorite_record(&details);
    let title = record.title.clone();

    let conn = open_store(dir).context("failed to open store")?;
    let mut store = FavoritesStore::open(conn);
    if store.toggle(record) {
        tracing::info!("Added {} ({}) to favorites", title, args.id);
    } else {
        tracing::info!("Removed {} ({}) from favorites", title, args.id);
    }

    Ok(())
}

/// Runs the `favorites clear` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[instrument(skip_all)]
fn run_favorites_clear(dir: Option<&PathBuf>) -> Result<()> {
    let conn = open_store(dir).context("failed to open store")?;
    let mut store = FavoritesStore::open(conn);
    let count = store.len();
    store.clear();
    tracing::info!("Removed {count} favorite(s)");

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
        Commands::Genres => run_genres(cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(&args, cli.dir.as_ref()).await,
        Commands::Favorites(favorites) => match favorites.command {
            FavoritesSubcommands::List => run_favorites_list(cli.dir.as_ref()),
            FavoritesSubcommands::Toggle(args) => {
                run_favorites_toggle(&args, cli.dir.as_ref()).await
            }
            FavoritesSubcommands::Clear => run_favorites_clear(cli.dir.as_ref()),
        },
    }
}
