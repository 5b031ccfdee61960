//! cinefind - search TMDB for movies and TV shows and open them in a player.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, BASE_URL_ENV, resolve_config_path};
use cinefind_api::tmdb::{
    LocalTmdbApi, MediaDetails, MediaSummary, MediaType, SearchMultiParams, SearchResult,
    TmdbClient, TrendingWindow, fetch_details, resolve_details,
};
use cinefind_api::urls::{
    DEFAULT_BACKDROP_SIZE, DEFAULT_POSTER_SIZE, backdrop_url, embed_url, image_url,
};

/// Message shown when a watch id resolves to neither a movie nor a series.
const WATCH_FAILURE: &str = "Failed to load movie details. Please try again.";

/// Number of cast members listed in the detail view.
const CAST_LIMIT: usize = 5;

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
    /// Search movies, TV shows and people (`search/multi`).
    Search(SearchArgs),
    /// List trending titles (`trending/all`).
    Trending(TrendingArgs),
    /// Show movie details.
    Movie(IdArgs),
    /// Show TV series details.
    Tv(IdArgs),
    /// Resolve an id as movie or series and print its player URL.
    Watch(WatchArgs),
    /// Build a poster or backdrop URL without calling the API.
    Image(ImageArgs),
    /// Inspect or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    #[arg(long)]
    query: String,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Trending window accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    Week,
}

impl From<WindowArg> for TrendingWindow {
    fn from(value: WindowArg) -> Self {
        match value {
            WindowArg::Day => Self::Day,
            WindowArg::Week => Self::Week,
        }
    }
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Time window.
    #[arg(long, value_enum, default_value = "week")]
    window: WindowArg,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie` and `tv` subcommands.
#[derive(clap::Args)]
struct IdArgs {
    /// TMDB ID.
    #[arg(long)]
    id: u64,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
struct WatchArgs {
    /// TMDB ID of a movie or TV series.
    #[arg(long)]
    id: u64,

    /// Open the player URL in the default browser.
    #[arg(long)]
    open: bool,
}

/// Arguments for the `image` subcommand.
#[derive(clap::Args)]
struct ImageArgs {
    /// Image path as returned by TMDB (e.g. `/abc.jpg`). Omit for the placeholder.
    #[arg(long)]
    path: Option<String>,

    /// Size token (e.g. `w500`, `original`).
    #[arg(long)]
    size: Option<String>,

    /// Build a backdrop URL instead of a poster URL.
    #[arg(long)]
    backdrop: bool,
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
    /// Print the config file location and values.
    Show,
    /// Store the TMDB API key in the config file.
    SetApiKey(SetApiKeyArgs),
}

/// Arguments for the `config set-api-key` subcommand.
#[derive(clap::Args)]
struct SetApiKeyArgs {
    /// TMDB v3 API key.
    #[arg(long)]
    key: String,
}

/// Builds a `TmdbClient` from environment variables and the config file.
///
/// # Errors
///
/// Returns an error if no API key is configured, the config file is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;

    let api_key = config.api_key(std::env::var(API_KEY_ENV).ok())?;
    let base_url = config.base_url(std::env::var(BASE_URL_ENV).ok())?;

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = base_url {
        tracing::debug!(%url, "using base URL override");
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;
    let params = SearchMultiParams::new(&args.query).page(args.page);

    let response = client
        .search_multi(&params)
        .await
        .context("TMDB search/multi request failed")?;

    if response.results.is_empty() {
        tracing::info!("No results for \"{}\"", args.query);
        return Ok(());
    }
    render_listing(&response);
    Ok(())
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_trending(args: &TrendingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let response = client
        .trending(args.window.into(), args.page)
        .await
        .context("TMDB trending request failed")?;

    render_listing(&response);
    Ok(())
}

/// Runs the `movie` and `tv` subcommands.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_details(media_type: MediaType, args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let details = fetch_details(&client, media_type, args.id)
        .await
        .with_context(|| format!("TMDB {media_type} details request failed"))?;

    render_details(&details);
    Ok(())
}

/// Runs the `watch` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build, the id resolves to
/// neither a movie nor a series, or the browser cannot be launched.
#[instrument(skip_all)]
async fn run_watch(args: &WatchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let (media_type, details) = resolve_details(&client, args.id)
        .await
        .into_parts()
        .context(WATCH_FAILURE)?;

    render_details(&details);
    let player = embed_url(media_type, details.id);
    tracing::info!("Player: {player}");

    if args.open {
        open::that(&player).with_context(|| format!("failed to open {player}"))?;
    }
    Ok(())
}

/// Runs the `image` subcommand.
fn run_image(args: &ImageArgs) {
    let url = build_image_url(args.path.as_deref(), args.size.as_deref(), args.backdrop);
    tracing::info!("{url}");
}

/// Picks the URL builder and default size for a poster or backdrop.
fn build_image_url(path: Option<&str>, size: Option<&str>, backdrop: bool) -> String {
    if backdrop {
        backdrop_url(path, size.unwrap_or(DEFAULT_BACKDROP_SIZE))
    } else {
        image_url(path, size.unwrap_or(DEFAULT_POSTER_SIZE))
    }
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;

    tracing::info!("Config: {}", config_path.display());
    tracing::info!(
        "api_key: {}",
        config
            .tmdb
            .api_key
            .as_deref()
            .map_or_else(|| String::from("(not set)"), mask_key)
    );
    tracing::info!(
        "base_url: {}",
        config.tmdb.base_url.as_deref().unwrap_or("(default)")
    );
    Ok(())
}

/// Runs the `config set-api-key` subcommand.
///
/// # Errors
///
/// Returns an error if the key is blank or the config file cannot be written.
#[instrument(skip_all)]
fn run_config_set_api_key(args: &SetApiKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let key = args.key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    let config_path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&config_path)?;
    config.tmdb.api_key = Some(String::from(key));
    config.save(&config_path)?;

    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Hides all but the last four characters of an API key.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return String::from("****");
    }
    let tail: String = key.chars().skip(count.saturating_sub(4)).collect();
    format!("****{tail}")
}

/// Logs one line per entry followed by a pagination footer.
fn render_listing(response: &SearchResult<MediaSummary>) {
    for item in &response.results {
        tracing::info!("{}", summary_line(item));
    }
    tracing::info!("{}", page_footer(response));
}

/// `kind  id  title (year)  poster-url`, tab separated.
fn summary_line(item: &MediaSummary) -> String {
    let kind = item.media_type.map_or("-", |k| k.as_str());
    let year = item
        .release_year()
        .map_or_else(|| String::from("-"), |y| y.to_string());
    let image = item
        .poster_path
        .as_deref()
        .or(item.profile_path.as_deref());
    format!(
        "{kind}\t{}\t{}\t{year}\t{}",
        item.id,
        item.display_title(),
        image_url(image, DEFAULT_POSTER_SIZE)
    )
}

fn page_footer(response: &SearchResult<MediaSummary>) -> String {
    let base = format!(
        "Page {}/{} ({} results)",
        response.page, response.total_pages, response.total_results
    );
    match response.next_page() {
        Some(next) => format!("{base}, next: --page {next}"),
        None => base,
    }
}

/// Logs the detail view shared by `movie`, `tv` and `watch`.
fn render_details(details: &MediaDetails) {
    match details.release_year() {
        Some(year) => tracing::info!("{} ({year})", details.display_title()),
        None => tracing::info!("{}", details.display_title()),
    }
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("\"{tagline}\"");
    }
    tracing::info!("ID: {}", details.id);
    if details.adult {
        tracing::info!("Type: {} [18+]", details.media_label());
    } else {
        tracing::info!("Type: {}", details.media_label());
    }
    // Unrated titles show no rating line at all.
    if details.vote_average.is_some_and(|avg| avg > 0.0) {
        tracing::info!(
            "Rating: {}/10 ({} votes)",
            details.rating_label(),
            group_thousands(&details.vote_count.unwrap_or(0).to_string())
        );
    }
    if let Some(minutes) = details.runtime_minutes() {
        tracing::info!("Runtime: {minutes} min");
    }
    if let (Some(seasons), Some(episodes)) = (details.number_of_seasons, details.number_of_episodes)
    {
        tracing::info!("Seasons: {seasons}, Episodes: {episodes}");
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        tracing::info!("Genres: {}", genres.join(", "));
    }
    let directors: Vec<&str> = details.directors().map(|d| d.name.as_str()).collect();
    if !directors.is_empty() {
        tracing::info!("Director: {}", directors.join(", "));
    }
    if let Some(credits) = &details.credits {
        let cast: Vec<&str> = credits
            .cast
            .iter()
            .take(CAST_LIMIT)
            .map(|c| c.name.as_str())
            .collect();
        if !cast.is_empty() {
            tracing::info!("Cast: {}", cast.join(", "));
        }
    }
    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        tracing::info!("Overview: {overview}");
    }
    if let Some(language) = details.original_language.as_deref().filter(|l| !l.is_empty()) {
        tracing::info!("Original Language: {}", language.to_uppercase());
    }
    if let Some(popularity) = details.popularity.filter(|p| *p > 0.0) {
        tracing::info!(
            "Popularity: {}",
            group_thousands(&format!("{:.0}", popularity.round()))
        );
    }
    tracing::info!(
        "Poster: {}",
        image_url(details.poster_path.as_deref(), DEFAULT_POSTER_SIZE)
    );
    tracing::info!(
        "Backdrop: {}",
        backdrop_url(details.backdrop_path.as_deref(), DEFAULT_BACKDROP_SIZE)
    );
    if let Some(url) = details.trailer().and_then(|t| t.youtube_url()) {
        tracing::info!("Trailer: {url}");
    }
}

/// Inserts `,` every three digits from the right: `21000` becomes `21,000`.
fn group_thousands(digits: &str) -> String {
    let mut grouped: Vec<char> = Vec::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.iter().rev().collect()
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
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Trending(args) => run_trending(&args, dir).await,
        Commands::Movie(args) => run_details(MediaType::Movie, &args, dir).await,
        Commands::Tv(args) => run_details(MediaType::Tv, &args, dir).await,
        Commands::Watch(args) => run_watch(&args, dir).await,
        Commands::Image(args) => {
            run_image(&args);
            Ok(())
        }
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::SetApiKey(args) => run_config_set_api_key(&args, dir),
        },
    }
}
