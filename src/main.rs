//! gamedash
//!
//! Serves the Game Industry History dashboard, or answers one-off questions
//! about the games table from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gamedash::api::{routes::dataset::summarize, serve, AppState};
use gamedash::config::{generate_default_config, Config};
use gamedash::dataset::{CleanedDataset, DatasetLoader};
use gamedash::reactive::Runtime;
use gamedash::recompute::{selection_count, FilterSelection, YearBounds};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Parser)]
#[command(name = "gamedash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Game Industry History dashboard")]
#[command(long_about = "Interactive dashboard over a table of video game releases.\nFilter by genre, rating and release years; see releases per platform and critic versus user scores.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Games table to load
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Verbose logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dashboard server (default)
    Serve,

    /// Count games matching a filter
    Count {
        /// Genres to keep (default: all)
        #[arg(short, long)]
        genre: Vec<String>,
        /// Ratings to keep (default: all)
        #[arg(short, long)]
        rating: Vec<String>,
        /// Lower year bound (default: earliest year in the table)
        #[arg(long)]
        from: Option<i32>,
        /// Upper year bound (default: latest year in the table)
        #[arg(long)]
        to: Option<i32>,
    },

    /// Print dataset summary and cleaning statistics as JSON
    Summary,

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    match cli.command.take().unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let (config, dataset) = prepare(&cli)?;
            tracing::info!(
                "Starting gamedash v{} ({} games, year bounds {})",
                env!("CARGO_PKG_VERSION"),
                dataset.len(),
                config.filter.year_bounds
            );
            let runtime = Arc::new(Runtime::new(dataset, config.filter.year_bounds));
            serve(AppState::new(runtime, config.server)).await?;
        }
        Commands::Count {
            genre,
            rating,
            from,
            to,
        } => {
            let (config, dataset) = prepare(&cli)?;
            let count = count_games(
                &dataset,
                genre,
                rating,
                from,
                to,
                config.filter.year_bounds,
            )?;
            println!("{}", count);
        }
        Commands::Summary => {
            let (_, dataset) = prepare(&cli)?;
            println!("{}", render_summary(&dataset)?);
        }
        Commands::InitConfig { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write config to {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Games matching the given filters; empty lists and absent years mean
/// everything the table holds
fn count_games(
    dataset: &CleanedDataset,
    genre: Vec<String>,
    rating: Vec<String>,
    from: Option<i32>,
    to: Option<i32>,
    bounds: YearBounds,
) -> anyhow::Result<usize> {
    let full = FilterSelection::full(dataset);
    let selection = FilterSelection::new(
        from.unwrap_or(full.year_min),
        to.unwrap_or(full.year_max),
        if genre.is_empty() { full.genres } else { genre.into_iter().collect() },
        if rating.is_empty() { full.ratings } else { rating.into_iter().collect() },
    );
    if selection.year_min > selection.year_max {
        anyhow::bail!(
            "Invalid year range: {} is after {}",
            selection.year_min,
            selection.year_max
        );
    }
    Ok(selection_count(&selection, dataset, bounds))
}

fn render_summary(dataset: &CleanedDataset) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summarize(dataset))
}

/// Resolve configuration, start logging and load the games table.
///
/// A missing or malformed table is fatal.
fn prepare(cli: &Cli) -> anyhow::Result<(Config, Arc<CleanedDataset>)> {
    let config = resolve_config(cli)?;
    init_tracing(&config);

    let dataset = load_dataset(&config)?;
    Ok((config, Arc::new(dataset)))
}

/// File, then environment, then command-line flags
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(data) = &cli.data {
        config.dataset.path = data.clone();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.debug {
        config.server.debug = true;
    }

    Ok(config)
}

/// Logs go to stderr; stdout carries only command output
fn init_tracing(config: &Config) {
    let json = config.logging.format.eq_ignore_ascii_case("json");
    build_subscriber(env_filter(config), json, std::io::stderr).init();
}

/// `RUST_LOG` wins, then the debug toggle, then the configured level
fn env_filter(config: &Config) -> EnvFilter {
    let default_level = if config.server.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("gamedash={},tower_http={}", default_level, default_level).into()
    })
}

fn build_subscriber<W>(
    filter: EnvFilter,
    json: bool,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(writer.clone())))
        .with((!json).then(|| fmt::layer().with_writer(writer)))
}

fn load_dataset(config: &Config) -> anyhow::Result<CleanedDataset> {
    let path = &config.dataset.path;
    DatasetLoader::new()
        .with_unknown_score_token(&config.dataset.unknown_score_token)
        .with_min_year(config.dataset.min_year)
        .load(path)
        .with_context(|| format!("Failed to load games table {}", path.display()))
}
