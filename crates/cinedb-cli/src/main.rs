//! cinedb - movie catalog browsing CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use cinedb_api::catalog::{CastMember, CatalogClient, GenreTag, LocalCatalogApi, Movie, Review};
use cinedb_api::provider::MovieProvider;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show the home sections: featured, most popular, and top rated.
    Home,
    /// Search movies by title, actor, or both.
    Search(SearchArgs),
    /// Show full details and reviews for one movie.
    Detail(DetailArgs),
    /// Show the reviews recorded for one movie.
    Reviews(ReviewsArgs),
    /// Run a raw catalog request string and print the shaped page.
    Fetch(FetchArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "inception").
    #[arg(long, required = true)]
    query: String,

    /// Which index to search.
    #[arg(long, value_enum, default_value = "combined")]
    mode: SearchMode,
}

/// Search index selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchMode {
    /// Movie titles only.
    Title,
    /// Credited actor names only.
    Actor,
    /// Both indexes, actor matches first, deduplicated by id.
    Combined,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// Movie identifier (e.g. "tt1375666").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `reviews` subcommand.
#[derive(clap::Args)]
struct ReviewsArgs {
    /// Movie identifier (e.g. "tt1375666").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `fetch` subcommand.
#[derive(clap::Args)]
struct FetchArgs {
    /// Request string (e.g. "get/mostpopular/?per_page=12&page=1").
    #[arg(long, required = true)]
    request: String,
}

/// Builds the catalog client from config.
///
/// Falls back to the built-in base URL when none is configured.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the configured base
/// URL does not parse, or the client fails to build.
fn build_client(dir: Option<&PathBuf>) -> Result<CatalogClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let mut builder = CatalogClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = config.api.base_url {
        let url: Url = base_url
            .parse()
            .with_context(|| format!("invalid base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build API client")
}

/// Display title: full title when present, plain title otherwise.
fn display_title(movie: &Movie) -> &str {
    movie
        .full_title
        .as_deref()
        .or(movie.title.as_deref())
        .unwrap_or("N/A")
}

/// Joins credited names for display.
fn join_names(members: &[CastMember]) -> String {
    members
        .iter()
        .map(|member| member.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Joins genre labels for display.
fn join_genres(genres: &[GenreTag]) -> String {
    genres
        .iter()
        .map(GenreTag::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints one movie per line: id, title, year, rating.
fn print_movie_lines(movies: &[Movie]) {
    tracing::info!("ID\t\tTitle\t\t\tYear\tIMDb");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            display_title(movie),
            movie.year.as_deref().unwrap_or("-"),
            movie
                .ratings
                .as_ref()
                .and_then(|ratings| ratings.im_db.as_deref())
                .unwrap_or("-"),
        );
    }
}

/// Prints the detail panel fields for one movie.
fn print_movie_detail(movie: &Movie) {
    tracing::info!("{}", display_title(movie));
    if let Some(awards) = &movie.awards {
        tracing::info!("Award: {awards}");
    }
    if let Some(countries) = &movie.countries {
        tracing::info!("Country: {countries}");
    }
    if let Some(languages) = &movie.languages {
        tracing::info!("Language: {languages}");
    }
    if !movie.director_list.is_empty() {
        tracing::info!("Director: {}", join_names(&movie.director_list));
    }
    if !movie.actor_list.is_empty() {
        tracing::info!("Actors: {}", join_names(&movie.actor_list));
    }
    if !movie.genre_list.is_empty() {
        tracing::info!("Genres: {}", join_genres(&movie.genre_list));
    }
    if let Some(runtime) = &movie.runtime_str {
        tracing::info!("Time: {runtime}");
    }
    if let Some(plot) = &movie.plot {
        tracing::info!("Plot: {plot}");
    }
}

/// Prints a review list, or a placeholder when it is empty.
fn print_reviews(reviews: &[Review]) {
    tracing::info!("Reviews ({})", reviews.len());
    if reviews.is_empty() {
        tracing::info!("No reviews yet");
        return;
    }
    for review in reviews {
        tracing::info!(
            "{} - {}",
            review.title.as_deref().unwrap_or("-"),
            review.username.as_deref().unwrap_or("-"),
        );
        if let Some(content) = &review.content {
            tracing::info!("{content}");
        }
    }
}

/// Runs the `home` subcommand.
///
/// The section batch is all-or-nothing; on failure it degrades to a
/// warning instead of showing partial sections.
///
/// # Errors
///
/// Returns an error if the API client fails to build.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let provider = MovieProvider::new(build_client(dir)?);

    let sections = match provider.home_sections().await {
        Ok(sections) => sections,
        Err(err) => {
            tracing::warn!("error loading movies: {err}");
            return Ok(());
        }
    };

    tracing::info!("Featured ({} movies)", sections.featured.len());
    print_movie_lines(&sections.featured);
    tracing::info!("Most popular ({} movies)", sections.popular.len());
    print_movie_lines(&sections.popular);
    tracing::info!("Top rated ({} movies)", sections.top_rated.len());
    print_movie_lines(&sections.top_rated);

    Ok(())
}

/// Runs the `search` subcommand.
///
/// Failures degrade to an empty-result message.
///
/// # Errors
///
/// Returns an error if the API client fails to build.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let provider = MovieProvider::new(build_client(dir)?);

    let result = match args.mode {
        SearchMode::Title => provider.search_movies(&args.query).await,
        SearchMode::Actor => provider.search_by_actor(&args.query).await,
        SearchMode::Combined => provider.search_combined(&args.query).await,
    };

    let movies = match result {
        Ok(movies) => movies,
        Err(err) => {
            tracing::warn!("error searching movies: {err}");
            Vec::new()
        }
    };

    if movies.is_empty() {
        tracing::info!("No results found for \"{}\"", args.query);
        return Ok(());
    }

    tracing::info!("Search results for \"{}\"", args.query);
    print_movie_lines(&movies);
    tracing::info!("Total: {} movies", movies.len());

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// Detail failures propagate; review failures degrade to an empty list.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the detail
/// fetch fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let provider = MovieProvider::new(build_client(dir)?);

    let movie = provider
        .movie_details(&args.id)
        .await
        .context("failed to fetch movie details")?;

    let reviews = match provider.movie_reviews(&args.id).await {
        Ok(reviews) => reviews,
        Err(err) => {
            tracing::warn!("error loading reviews: {err}");
            Vec::new()
        }
    };

    print_movie_detail(&movie);
    print_reviews(&reviews);

    Ok(())
}

/// Runs the `reviews` subcommand.
///
/// Failures degrade to an empty list.
///
/// # Errors
///
/// Returns an error if the API client fails to build.
#[instrument(skip_all)]
async fn run_reviews(args: &ReviewsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let provider = MovieProvider::new(build_client(dir)?);

    let reviews = match provider.movie_reviews(&args.id).await {
        Ok(reviews) => reviews,
        Err(err) => {
            tracing::warn!("error loading reviews: {err}");
            Vec::new()
        }
    };

    print_reviews(&reviews);

    Ok(())
}

/// Runs the `fetch` subcommand, printing the shaped page as JSON.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the request
/// fails anywhere in the pipeline.
#[instrument(skip_all)]
async fn run_fetch(args: &FetchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let page = client
        .execute(&args.request)
        .await
        .with_context(|| format!("request failed: {}", args.request))?;

    let rendered = serde_json::to_string_pretty(&page).context("failed to render result page")?;
    tracing::info!("{rendered}");

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
        Commands::Home => run_home(cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Reviews(args) => run_reviews(&args, cli.dir.as_ref()).await,
        Commands::Fetch(args) => run_fetch(&args, cli.dir.as_ref()).await,
    }
}
