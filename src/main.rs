use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use piaofang::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "piaofang",
    version,
    about = "Box office harvester for piaofang.maoyan.com movie pages",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file; environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest every movie listed on the rankings page
    Harvest {
        /// Output directory for movie documents
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Harvest at most this many pages
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Harvest a single movie page
    Page {
        /// Movie page URL, e.g. https://piaofang.maoyan.com/movie/1250952
        #[arg(short, long)]
        url: String,

        /// Output directory for the movie document
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the movie pages listed on the rankings page
    Links,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    match &cli.command {
        Commands::Harvest {
            output: Some(dir), ..
        }
        | Commands::Page {
            output: Some(dir), ..
        } => config.storage.output_dir = dir.clone(),
        _ => {}
    }
    config.validate().context("Invalid configuration")?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("piaofang harvester starting");

    match cli.command {
        Commands::Harvest { limit, .. } => {
            tracing::info!(
                limit = ?limit,
                output = %config.storage.output_dir.display(),
                "Starting harvest command"
            );
            commands::harvest(&config, limit)?;
        }

        Commands::Page { url, .. } => {
            tracing::info!(url = %url, "Starting page command");
            commands::page(&config, &url)?;
        }

        Commands::Links => {
            tracing::info!("Starting links command");
            commands::links(&config)?;
        }
    }

    tracing::info!("piaofang completed successfully");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env().context("Failed to load configuration from environment"),
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("piaofang=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("piaofang={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
