//! cinedex - TMDB catalog browser and favorites manager.

/// Application configuration (TOML).
mod config;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_api_key, resolve_config_path};
use cinedex_api::tmdb::{DiscoverMovieParams, DiscoverTvParams, TmdbClient};
use cinedex_catalog::model::{
    Credits, Crew, Movie, MovieDetails, PersonCredits, PersonDetails, Series, SeriesDetails, Video,
};
use cinedex_catalog::{CatalogRepository, HomeFeed, MovieDetailBundle, SeriesDetailBundle};
use cinedex_db::CatalogStore;

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
    /// Browse and search movies.
    Movies(MoviesCommand),
    /// Browse and search TV series.
    Series(SeriesCommand),
    /// Look up people.
    Person(PersonCommand),
    /// Manage the favorites shelf.
    Favorites(FavoritesCommand),
    /// Show the home feed shelves.
    Home,
    /// Local cache operations.
    Db(DbCommand),
    /// Read or update the application config.
    Config(ConfigCommand),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// List popular movies.
    Popular(PageArgs),
    /// List top rated movies.
    TopRated(PageArgs),
    /// List movies trending today.
    Trending,
    /// Search movies by free text.
    Search(SearchArgs),
    /// Show one movie's detail record.
    Details(IdArgs),
    /// List videos attached to a movie.
    Videos(IdArgs),
    /// Show a movie's cast and crew.
    Credits(IdArgs),
    /// List movies similar to the given one.
    Similar(IdPageArgs),
    /// List recommendations seeded by the given movie.
    Recommendations(IdPageArgs),
    /// Discover movies by filter.
    Discover(DiscoverMovieArgs),
    /// Show the full detail view (details, trailer, cast, similar).
    View(IdArgs),
}

/// Arguments for the `series` subcommand.
#[derive(clap::Args)]
struct SeriesCommand {
    /// Series subcommand to run.
    #[command(subcommand)]
    command: SeriesSubcommands,
}

/// Available series subcommands.
#[derive(Subcommand)]
enum SeriesSubcommands {
    /// List popular series.
    Popular(PageArgs),
    /// List top rated series.
    TopRated(PageArgs),
    /// List series trending today.
    Trending,
    /// Search series by free text.
    Search(SearchArgs),
    /// Show one series' detail record.
    Details(IdArgs),
    /// List videos attached to a series.
    Videos(IdArgs),
    /// Show a series' cast and crew.
    Credits(IdArgs),
    /// List series similar to the given one.
    Similar(IdPageArgs),
    /// List recommendations seeded by the given series.
    Recommendations(IdPageArgs),
    /// Discover series by filter.
    Discover(DiscoverSeriesArgs),
    /// Show the full detail view (details, trailer, cast, similar).
    View(IdArgs),
}

/// Arguments for the `person` subcommand.
#[derive(clap::Args)]
struct PersonCommand {
    /// Person subcommand to run.
    #[command(subcommand)]
    command: PersonSubcommands,
}

/// Available person subcommands.
#[derive(Subcommand)]
enum PersonSubcommands {
    /// Show a person's biography details.
    Details(IdArgs),
    /// List a person's combined movie and TV credits.
    Credits(IdArgs),
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
    /// List favorites, most recently added first.
    List(FavoritesListArgs),
    /// Add a title to favorites.
    Add(FavoriteTargetArgs),
    /// Remove a title from favorites.
    Remove(FavoriteTargetArgs),
    /// Toggle a title's favorite state.
    Toggle(FavoriteTargetArgs),
}

/// Arguments for the `db` subcommand.
#[derive(clap::Args)]
struct DbCommand {
    /// Db subcommand to run.
    #[command(subcommand)]
    command: DbSubcommands,
}

/// Available database subcommands.
#[derive(Subcommand)]
enum DbSubcommands {
    /// Warm the browse cache from the popular and trending lists.
    Refresh(RefreshArgs),
    /// List cached titles.
    List(DbListArgs),
    /// Delete detail rows older than the given age.
    Evict(EvictArgs),
    /// Empty the whole cache, favorites included.
    Clear,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the TMDB API key in the config file.
    SetKey(SetKeyArgs),
    /// Show the config file path and key status.
    Show,
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// TMDB API key to store.
    #[arg(long, required = true)]
    api_key: String,
}

/// A single result page.
#[derive(clap::Args)]
struct PageArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// A single TMDB ID.
#[derive(clap::Args)]
struct IdArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// A TMDB ID plus a result page.
#[derive(clap::Args)]
struct IdPageArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `search` subcommands.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "inception").
    #[arg(long, required = true)]
    query: String,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movies discover` subcommand.
#[derive(clap::Args)]
struct DiscoverMovieArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Comma-separated genre IDs (e.g. "28,12").
    #[arg(long)]
    genres: Option<String>,

    /// Earliest release date (YYYY-MM-DD).
    #[arg(long)]
    release_date_gte: Option<String>,

    /// Latest release date (YYYY-MM-DD).
    #[arg(long)]
    release_date_lte: Option<String>,

    /// Minimum vote average (0-10).
    #[arg(long)]
    vote_average_gte: Option<f64>,

    /// Maximum vote average (0-10).
    #[arg(long)]
    vote_average_lte: Option<f64>,

    /// Minimum runtime in minutes.
    #[arg(long)]
    runtime_gte: Option<u32>,

    /// Maximum runtime in minutes.
    #[arg(long)]
    runtime_lte: Option<u32>,

    /// Original language filter (ISO 639-1).
    #[arg(long)]
    language: Option<String>,

    /// Sort key (default: "popularity.desc").
    #[arg(long)]
    sort_by: Option<String>,
}

impl DiscoverMovieArgs {
    /// Builds discover params, applying only the filters that were given.
    fn to_params(&self) -> DiscoverMovieParams {
        let mut params = DiscoverMovieParams::new().page(self.page);
        if let Some(sort_by) = &self.sort_by {
            params = params.sort_by(sort_by);
        }
        if let Some(genres) = &self.genres {
            params = params.genres(genres);
        }
        if let Some(date) = &self.release_date_gte {
            params = params.release_date_gte(date);
        }
        if let Some(date) = &self.release_date_lte {
            params = params.release_date_lte(date);
        }
        if let Some(value) = self.vote_average_gte {
            params = params.vote_average_gte(value);
        }
        if let Some(value) = self.vote_average_lte {
            params = params.vote_average_lte(value);
        }
        if let Some(minutes) = self.runtime_gte {
            params = params.runtime_gte(minutes);
        }
        if let Some(minutes) = self.runtime_lte {
            params = params.runtime_lte(minutes);
        }
        if let Some(language) = &self.language {
            params = params.original_language(language);
        }
        params
    }
}

/// Arguments for the `series discover` subcommand.
#[derive(clap::Args)]
struct DiscoverSeriesArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Comma-separated genre IDs (e.g. "18,80").
    #[arg(long)]
    genres: Option<String>,

    /// Earliest first air date (YYYY-MM-DD).
    #[arg(long)]
    first_air_date_gte: Option<String>,

    /// Latest first air date (YYYY-MM-DD).
    #[arg(long)]
    first_air_date_lte: Option<String>,

    /// Minimum vote average (0-10).
    #[arg(long)]
    vote_average_gte: Option<f64>,

    /// Maximum vote average (0-10).
    #[arg(long)]
    vote_average_lte: Option<f64>,

    /// Original language filter (ISO 639-1).
    #[arg(long)]
    language: Option<String>,

    /// Sort key (default: "popularity.desc").
    #[arg(long)]
    sort_by: Option<String>,
}

impl DiscoverSeriesArgs {
    /// Builds discover params, applying only the filters that were given.
    fn to_params(&self) -> DiscoverTvParams {
        let mut params = DiscoverTvParams::new().page(self.page);
        if let Some(sort_by) = &self.sort_by {
            params = params.sort_by(sort_by);
        }
        if let Some(genres) = &self.genres {
            params = params.genres(genres);
        }
        if let Some(date) = &self.first_air_date_gte {
            params = params.first_air_date_gte(date);
        }
        if let Some(date) = &self.first_air_date_lte {
            params = params.first_air_date_lte(date);
        }
        if let Some(value) = self.vote_average_gte {
            params = params.vote_average_gte(value);
        }
        if let Some(value) = self.vote_average_lte {
            params = params.vote_average_lte(value);
        }
        if let Some(language) = &self.language {
            params = params.original_language(language);
        }
        params
    }
}

/// Arguments for the `favorites list` subcommand.
#[derive(clap::Args)]
struct FavoritesListArgs {
    /// List favorite series instead of movies.
    #[arg(long)]
    series: bool,
}

/// Target of a favorites operation.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct FavoriteTargetArgs {
    /// TMDB movie ID.
    #[arg(long)]
    movie: Option<u64>,

    /// TMDB series ID.
    #[arg(long)]
    series: Option<u64>,
}

/// A resolved favorites target.
enum FavoriteTarget {
    /// A movie by TMDB ID.
    Movie(u64),
    /// A series by TMDB ID.
    Series(u64),
}

impl FavoriteTargetArgs {
    /// Resolves which of the two IDs was given.
    fn resolve(&self) -> Result<FavoriteTarget> {
        match (self.movie, self.series) {
            (Some(id), None) => Ok(FavoriteTarget::Movie(id)),
            (None, Some(id)) => Ok(FavoriteTarget::Series(id)),
            _ => anyhow::bail!("specify exactly one of --movie or --series"),
        }
    }
}

/// Arguments for the `db refresh` subcommand.
#[derive(clap::Args)]
struct RefreshArgs {
    /// Number of popular pages to fetch per catalog.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

/// Arguments for the `db list` subcommand.
#[derive(clap::Args)]
struct DbListArgs {
    /// List cached series instead of movies.
    #[arg(long)]
    series: bool,
}

/// Arguments for the `db evict` subcommand.
#[derive(clap::Args)]
struct EvictArgs {
    /// Delete detail rows cached more than this many hours ago.
    #[arg(long, required = true)]
    max_age_hours: u32,
}

/// Builds a `TmdbClient` with the resolved API key.
///
/// # Errors
///
/// Returns an error if no API key is configured or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    TmdbClient::builder()
        .api_key(resolve_api_key(dir)?)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Builds the full repository: TMDB client plus local cache store.
fn build_repository(dir: Option<&PathBuf>) -> Result<CatalogRepository<TmdbClient>> {
    let client = build_tmdb_client(dir)?;
    let store = CatalogStore::open(dir).context("failed to open database")?;
    Ok(CatalogRepository::new(client, store))
}

/// Opens a repository for cache-only commands. No API key is needed, so
/// the client slot stays empty.
fn open_cache(dir: Option<&PathBuf>) -> Result<CatalogRepository<()>> {
    let store = CatalogStore::open(dir).context("failed to open database")?;
    Ok(CatalogRepository::new((), store))
}

/// Resolves the full domain value for a movie: the cached row when
/// present, otherwise a detail fetch.
async fn resolve_movie(repo: &CatalogRepository<TmdbClient>, id: u64) -> Result<Movie> {
    if let Some(movie) = repo.cached_movie(id).await? {
        return Ok(movie);
    }
    let details = repo.movie_details(id).await.context("movie not found")?;
    Ok(movie_from_details(&details))
}

/// Resolves the full domain value for a series: the cached row when
/// present, otherwise a detail fetch.
async fn resolve_series(repo: &CatalogRepository<TmdbClient>, id: u64) -> Result<Series> {
    if let Some(series) = repo.cached_series_by_id(id).await? {
        return Ok(series);
    }
    let details = repo.series_details(id).await.context("series not found")?;
    Ok(series_from_details(&details))
}

/// Builds a movie summary from its detail record. The detail record
/// carries no popularity score, so it comes out zero.
fn movie_from_details(details: &MovieDetails) -> Movie {
    Movie {
        id: details.id,
        title: details.title.clone(),
        overview: details.overview.clone(),
        poster_url: details.poster_url.clone(),
        backdrop_url: details.backdrop_url.clone(),
        release_date: details.release_date.clone(),
        vote_average: details.vote_average,
        popularity: 0.0,
        genre_ids: details.genres.iter().map(|genre| genre.id).collect(),
    }
}

/// Builds a series summary from its detail record.
fn series_from_details(details: &SeriesDetails) -> Series {
    Series {
        id: details.id,
        name: details.name.clone(),
        overview: details.overview.clone(),
        poster_url: details.poster_url.clone(),
        backdrop_url: details.backdrop_url.clone(),
        first_air_date: details.first_air_date.clone(),
        vote_average: details.vote_average,
        popularity: 0.0,
    }
}

/// Runs the `movies` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_movies(cmd: MoviesSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    match cmd {
        MoviesSubcommands::Popular(args) => print_movies(&repo.popular_movies(args.page).await?),
        MoviesSubcommands::TopRated(args) => {
            print_movies(&repo.top_rated_movies(args.page).await?);
        }
        MoviesSubcommands::Trending => print_movies(&repo.trending_movies().await?),
        MoviesSubcommands::Search(args) => {
            print_movies(&repo.search_movies(&args.query, args.page).await?);
        }
        MoviesSubcommands::Details(args) => print_movie_details(&repo.movie_details(args.id).await?),
        MoviesSubcommands::Videos(args) => print_videos(&repo.movie_videos(args.id).await?),
        MoviesSubcommands::Credits(args) => print_credits(&repo.movie_credits(args.id).await?),
        MoviesSubcommands::Similar(args) => {
            print_movies(&repo.similar_movies(args.id, args.page).await?);
        }
        MoviesSubcommands::Recommendations(args) => {
            print_movies(&repo.movie_recommendations(args.id, args.page).await?);
        }
        MoviesSubcommands::Discover(args) => {
            print_movies(&repo.discover_movies(&args.to_params()).await?);
        }
        MoviesSubcommands::View(args) => {
            print_movie_bundle(&repo.movie_detail_bundle(args.id).await?);
        }
    }
    Ok(())
}

/// Runs the `series` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_series(cmd: SeriesSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    match cmd {
        SeriesSubcommands::Popular(args) => print_series(&repo.popular_series(args.page).await?),
        SeriesSubcommands::TopRated(args) => {
            print_series(&repo.top_rated_series(args.page).await?);
        }
        SeriesSubcommands::Trending => print_series(&repo.trending_series().await?),
        SeriesSubcommands::Search(args) => {
            print_series(&repo.search_series(&args.query, args.page).await?);
        }
        SeriesSubcommands::Details(args) => {
            print_series_details(&repo.series_details(args.id).await?);
        }
        SeriesSubcommands::Videos(args) => print_videos(&repo.series_videos(args.id).await?),
        SeriesSubcommands::Credits(args) => print_credits(&repo.series_credits(args.id).await?),
        SeriesSubcommands::Similar(args) => {
            print_series(&repo.similar_series(args.id, args.page).await?);
        }
        SeriesSubcommands::Recommendations(args) => {
            print_series(&repo.series_recommendations(args.id, args.page).await?);
        }
        SeriesSubcommands::Discover(args) => {
            print_series(&repo.discover_series(&args.to_params()).await?);
        }
        SeriesSubcommands::View(args) => {
            print_series_bundle(&repo.series_detail_bundle(args.id).await?);
        }
    }
    Ok(())
}

/// Runs the `person` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_person(cmd: PersonSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    match cmd {
        PersonSubcommands::Details(args) => {
            print_person_details(&repo.person_details(args.id).await?);
        }
        PersonSubcommands::Credits(args) => {
            print_person_credits(&repo.person_credits(args.id).await?);
        }
    }
    Ok(())
}

/// Runs the `favorites` subcommands.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved or a cache/API
/// operation fails.
#[instrument(skip_all)]
async fn run_favorites(cmd: FavoritesSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    match cmd {
        FavoritesSubcommands::List(args) => {
            let repo = open_cache(dir)?;
            if args.series {
                print_series(&repo.favorite_series().current());
            } else {
                print_movies(&repo.favorite_movies().current());
            }
            Ok(())
        }
        FavoritesSubcommands::Add(args) => run_favorites_add(&args, dir).await,
        FavoritesSubcommands::Remove(args) => run_favorites_remove(&args, dir).await,
        FavoritesSubcommands::Toggle(args) => run_favorites_toggle(&args, dir).await,
    }
}

/// Runs `favorites add`. Fetches the title first so the stored row
/// carries the full record.
#[instrument(skip_all)]
async fn run_favorites_add(args: &FavoriteTargetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    match args.resolve()? {
        FavoriteTarget::Movie(id) => {
            let movie = resolve_movie(&repo, id).await?;
            repo.add_movie_to_favorites(&movie).await?;
            tracing::info!("Added \"{}\" ({}) to favorites", movie.title, movie.id);
        }
        FavoriteTarget::Series(id) => {
            let series = resolve_series(&repo, id).await?;
            repo.add_series_to_favorites(&series).await?;
            tracing::info!("Added \"{}\" ({}) to favorites", series.name, series.id);
        }
    }
    Ok(())
}

/// Runs `favorites remove`. Cache-only; the row stays cached with the
/// flag cleared.
#[instrument(skip_all)]
async fn run_favorites_remove(args: &FavoriteTargetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let repo = open_cache(dir)?;
    match args.resolve()? {
        FavoriteTarget::Movie(id) => {
            repo.remove_movie_from_favorites(id).await?;
            tracing::info!("Removed movie {} from favorites", id);
        }
        FavoriteTarget::Series(id) => {
            repo.remove_series_from_favorites(id).await?;
            tracing::info!("Removed series {} from favorites", id);
        }
    }
    Ok(())
}

/// Runs `favorites toggle`.
#[instrument(skip_all)]
async fn run_favorites_toggle(args: &FavoriteTargetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    match args.resolve()? {
        FavoriteTarget::Movie(id) => {
            let movie = resolve_movie(&repo, id).await?;
            let favorite = repo.toggle_movie_favorite(&movie).await?;
            tracing::info!(
                "\"{}\" is {} a favorite",
                movie.title,
                if favorite { "now" } else { "no longer" },
            );
        }
        FavoriteTarget::Series(id) => {
            let series = resolve_series(&repo, id).await?;
            let favorite = repo.toggle_series_favorite(&series).await?;
            tracing::info!(
                "\"{}\" is {} a favorite",
                series.name,
                if favorite { "now" } else { "no longer" },
            );
        }
    }
    Ok(())
}

/// Runs the `home` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;
    print_home(&repo.home_feed().await?);
    Ok(())
}

/// Runs the `db` subcommands.
///
/// # Errors
///
/// Returns an error if cache or API operations fail.
#[instrument(skip_all)]
async fn run_db(cmd: DbSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    match cmd {
        DbSubcommands::Refresh(args) => run_db_refresh(&args, dir).await,
        DbSubcommands::List(args) => {
            let repo = open_cache(dir)?;
            if args.series {
                print_series(&repo.cached_series().current());
            } else {
                print_movies(&repo.cached_movies().current());
            }
            Ok(())
        }
        DbSubcommands::Evict(args) => {
            let repo = open_cache(dir)?;
            let max_age_millis = i64::from(args.max_age_hours).saturating_mul(3_600_000);
            let cutoff = chrono::Utc::now()
                .timestamp_millis()
                .saturating_sub(max_age_millis);
            let deleted = repo.evict_stale_details(cutoff).await?;
            tracing::info!("Evicted {} stale detail row(s)", deleted);
            Ok(())
        }
        DbSubcommands::Clear => {
            let repo = open_cache(dir)?;
            repo.clear_cache().await?;
            tracing::info!("Cache cleared");
            Ok(())
        }
    }
}

/// Runs the `config` subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_config(cmd: ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    match cmd {
        ConfigSubcommands::SetKey(args) => {
            let mut config = AppConfig::load(&config_path).unwrap_or_default();
            config.auth.api_key = Some(args.api_key);
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved API key to {}", config_path.display());
        }
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            tracing::info!("Config: {}", config_path.display());
            tracing::info!(
                "API key: {}",
                if config.auth.api_key.is_some_and(|key| !key.is_empty()) {
                    "configured"
                } else {
                    "not set"
                },
            );
        }
    }
    Ok(())
}

/// Runs `db refresh`: fetches trending plus N popular pages for both
/// catalogs and upserts them as plain cache rows.
#[instrument(skip_all)]
async fn run_db_refresh(args: &RefreshArgs, dir: Option<&PathBuf>) -> Result<()> {
    let repo = build_repository(dir)?;

    let mut movies = repo.trending_movies().await?;
    for page in 1..=args.pages {
        movies.extend(repo.popular_movies(page).await?);
    }
    let movies = dedup_movies(movies);
    let movies_written = repo.cache_movies(&movies).await?;

    let mut series = repo.trending_series().await?;
    for page in 1..=args.pages {
        series.extend(repo.popular_series(page).await?);
    }
    let series = dedup_series(series);
    let series_written = repo.cache_series_list(&series).await?;

    tracing::info!(
        "Cache refresh complete: {} movies, {} series",
        movies_written,
        series_written,
    );

    Ok(())
}

/// Drops duplicate movies by ID, keeping the first occurrence.
fn dedup_movies(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    movies
        .into_iter()
        .filter(|movie| seen.insert(movie.id))
        .collect()
}

/// Drops duplicate series by ID, keeping the first occurrence.
fn dedup_series(series: Vec<Series>) -> Vec<Series> {
    let mut seen = HashSet::new();
    series
        .into_iter()
        .filter(|series| seen.insert(series.id))
        .collect()
}

/// Replaces an empty string with a dash for tabular output.
fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn print_movies(movies: &[Movie]) {
    tracing::info!("ID\tRating\tReleased\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{:.1}\t{}\t{}",
            movie.id,
            movie.vote_average,
            dash(&movie.release_date),
            movie.title,
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

fn print_series(series: &[Series]) {
    tracing::info!("ID\tRating\tFirstAired\tName");
    for entry in series {
        tracing::info!(
            "{}\t{:.1}\t{}\t{}",
            entry.id,
            entry.vote_average,
            dash(&entry.first_air_date),
            entry.name,
        );
    }
    tracing::info!("Total: {} series", series.len());
}

fn print_movie_details(details: &MovieDetails) {
    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    if details.original_title != details.title {
        tracing::info!("Original Title: {}", details.original_title);
    }
    tracing::info!("Released: {}", dash(&details.release_date));
    tracing::info!("Runtime: {} min", details.runtime);
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        details.vote_average,
        details.vote_count
    );
    tracing::info!("Genres: {}", join_genres(details));
    tracing::info!("Status: {}", dash(&details.status));
    if !details.tagline.is_empty() {
        tracing::info!("Tagline: {}", details.tagline);
    }
    tracing::info!("Overview: {}", dash(&details.overview));
}

fn join_genres(details: &MovieDetails) -> String {
    details
        .genres
        .iter()
        .map(|genre| genre.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_series_details(details: &SeriesDetails) {
    tracing::info!("ID: {}", details.id);
    tracing::info!("Name: {}", details.name);
    if details.original_name != details.name {
        tracing::info!("Original Name: {}", details.original_name);
    }
    tracing::info!("First Air Date: {}", dash(&details.first_air_date));
    tracing::info!("Seasons: {}", details.number_of_seasons);
    tracing::info!("Episodes: {}", details.number_of_episodes);
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        details.vote_average,
        details.vote_count
    );
    tracing::info!("Status: {}", dash(&details.status));
    if !details.tagline.is_empty() {
        tracing::info!("Tagline: {}", details.tagline);
    }
    tracing::info!("Overview: {}", dash(&details.overview));
}

fn print_videos(videos: &[Video]) {
    tracing::info!("Type\tOfficial\tName\tURL");
    for video in videos {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            video.video_type,
            if video.official { "yes" } else { "no" },
            video.name,
            dash(&video.youtube_url()),
        );
    }
    tracing::info!("Total: {} videos", videos.len());
}

fn print_credits(credits: &Credits) {
    tracing::info!("Cast:");
    for member in &credits.cast {
        tracing::info!("  {}\t{}\tas {}", member.id, member.name, dash(&member.character));
    }
    let directors = join_names(&credits.directors());
    if !directors.is_empty() {
        tracing::info!("Directed by: {}", directors);
    }
    let writers = join_names(&credits.writers());
    if !writers.is_empty() {
        tracing::info!("Written by: {}", writers);
    }
    tracing::info!(
        "Total: {} cast, {} crew",
        credits.cast.len(),
        credits.crew.len()
    );
}

fn join_names(crew: &[&Crew]) -> String {
    crew.iter()
        .map(|member| member.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_person_details(person: &PersonDetails) {
    tracing::info!("ID: {}", person.id);
    tracing::info!("Name: {}", person.name);
    tracing::info!("Known For: {}", dash(&person.known_for_department));
    tracing::info!("Born: {}", dash(&person.birthday));
    if !person.deathday.is_empty() {
        tracing::info!("Died: {}", person.deathday);
    }
    tracing::info!("Place of Birth: {}", dash(&person.place_of_birth));
    tracing::info!("Biography: {}", dash(&person.biography));
}

fn print_person_credits(credits: &PersonCredits) {
    let merged = credits.all();
    tracing::info!("ID\tDate\t\tType\tRole\tTitle");
    for credit in &merged {
        let role = if credit.character.is_empty() {
            &credit.job
        } else {
            &credit.character
        };
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            credit.id,
            dash(&credit.release_date),
            credit.media_type,
            dash(role),
            credit.title,
        );
    }
    tracing::info!("Total: {} credits", merged.len());
}

fn print_home(feed: &HomeFeed) {
    print_shelf_movies("Trending movies", &feed.trending_movies);
    print_shelf_movies("Popular movies", &feed.popular_movies);
    print_shelf_series("Trending series", &feed.trending_series);
    print_shelf_series("Popular series", &feed.popular_series);
}

fn print_shelf_movies(label: &str, movies: &[Movie]) {
    tracing::info!("{}:", label);
    for movie in movies.iter().take(10) {
        tracing::info!("  {}\t{:.1}\t{}", movie.id, movie.vote_average, movie.title);
    }
}

fn print_shelf_series(label: &str, series: &[Series]) {
    tracing::info!("{}:", label);
    for entry in series.iter().take(10) {
        tracing::info!("  {}\t{:.1}\t{}", entry.id, entry.vote_average, entry.name);
    }
}

fn print_movie_bundle(bundle: &MovieDetailBundle) {
    print_movie_details(&bundle.details);
    if let Some(trailer) = &bundle.trailer {
        tracing::info!("Trailer: {} ({})", trailer.name, trailer.youtube_url());
    }
    if !bundle.credits.cast.is_empty() {
        let starring = bundle
            .credits
            .cast
            .iter()
            .take(5)
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!("Starring: {}", starring);
    }
    if !bundle.similar.is_empty() {
        tracing::info!("Similar:");
        for movie in bundle.similar.iter().take(5) {
            tracing::info!("  {}\t{}", movie.id, movie.title);
        }
    }
}

fn print_series_bundle(bundle: &SeriesDetailBundle) {
    print_series_details(&bundle.details);
    if let Some(trailer) = &bundle.trailer {
        tracing::info!("Trailer: {} ({})", trailer.name, trailer.youtube_url());
    }
    if !bundle.credits.cast.is_empty() {
        let starring = bundle
            .credits
            .cast
            .iter()
            .take(5)
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!("Starring: {}", starring);
    }
    if !bundle.similar.is_empty() {
        tracing::info!("Similar:");
        for series in bundle.similar.iter().take(5) {
            tracing::info!("  {}\t{}", series.id, series.name);
        }
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Movies(cmd) => run_movies(cmd.command, cli.dir.as_ref()).await,
        Commands::Series(cmd) => run_series(cmd.command, cli.dir.as_ref()).await,
        Commands::Person(cmd) => run_person(cmd.command, cli.dir.as_ref()).await,
        Commands::Favorites(cmd) => run_favorites(cmd.command, cli.dir.as_ref()).await,
        Commands::Home => run_home(cli.dir.as_ref()).await,
        Commands::Db(cmd) => run_db(cmd.command, cli.dir.as_ref()).await,
        Commands::Config(cmd) => run_config(cmd.command, cli.dir.as_ref()),
    }
}
