//! Osusume Chat
//!
//! Command-line front end for the anime recommender: one-shot questions,
//! an interactive line-by-line chat, and catalog statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use osusume_core::{CatalogStore, Recommender, RecommenderConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Default catalog location, relative to the working directory.
const DEFAULT_CATALOG: &str = "data/sample_anime.csv";

/// CLI arguments
#[derive(Parser)]
#[command(name = "osusume-chat")]
#[command(about = "Ask for anime recommendations in plain language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog CSV file
    #[arg(short, long, env = "OSUSUME_CATALOG", default_value = DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// JSON configuration file
    #[arg(long, env = "OSUSUME_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum recommendations per answer
    #[arg(long)]
    cap: Option<usize>,

    /// Fixed sampling seed for reproducible answers
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query
    Ask {
        /// The question, e.g. "popular comedy movies with score above 8"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Read queries from stdin, one per line
    Chat,
    /// Show catalog statistics
    Stats {
        /// Number of genres to list
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },
}

fn load_config(cli: &Cli) -> Result<RecommenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    if let Some(cap) = cli.cap {
        config = config.with_cap(cap);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn build_recommender(cli: &Cli) -> Result<Recommender> {
    let config = load_config(cli)?;
    let catalog = CatalogStore::from_path(&cli.catalog)
        .with_context(|| format!("failed to load catalog from {}", cli.catalog.display()))?;
    info!(records = catalog.len(), "catalog ready");
    Recommender::new(catalog, config).context("invalid recommender configuration")
}

fn chat(recommender: &Recommender) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "quit" | "exit") {
            debug!("chat ended by user");
            break;
        }
        writeln!(stdout, "{}\n", recommender.answer(query))?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_stats(catalog: &CatalogStore, top: usize) {
    println!("Catalog: {}", catalog.source_name());
    println!("Records: {}", catalog.len());

    let scores: Vec<f32> = catalog.score_values().collect();
    if !scores.is_empty() {
        let mean = scores.iter().sum::<f32>() / scores.len() as f32;
        println!("Scored records: {} (mean {:.2})", scores.len(), mean);
    }

    println!("\nGenres:");
    for (genre, count) in catalog.genre_distribution().into_iter().take(top) {
        println!("  {genre:<20} {count}");
    }

    println!("\nTypes:");
    for (anime_type, count) in catalog.type_distribution() {
        println!("  {:<20} {count}", anime_type.to_string());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let recommender = build_recommender(&cli)?;

    match &cli.command {
        Commands::Ask { query } => {
            println!("{}", recommender.answer(&query.join(" ")));
        }
        Commands::Chat => chat(&recommender)?,
        Commands::Stats { top } => print_stats(&recommender.catalog(), *top),
    }

    Ok(())
}
