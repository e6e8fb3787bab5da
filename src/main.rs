//! secondhand-search - Unified search over Korean secondhand marketplaces
//!
//! Searches Bunjang and Joongna together from the terminal or over HTTP.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use secondhand_search::commands::{BatchCommand, RawCommand, SearchCommand, ServeCommand};
use secondhand_search::config::{Config, OutputFormat};
use secondhand_search::joongna::JoongnaStrategy;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "secondhand-search",
    version,
    about = "Search Bunjang and Joongna at once",
    long_about = "Searches the Bunjang and Joongna secondhand marketplaces concurrently and merges the listings newest first."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SECONDHAND_PROXY")]
    proxy: Option<String>,

    /// How Joongna results are fetched (api, page)
    #[arg(long, global = true)]
    joongna_strategy: Option<JoongnaStrategy>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search both marketplaces
    #[command(alias = "s")]
    Search {
        /// Search keyword
        keyword: String,
    },

    /// Search a list of keywords and report per-platform counts
    Batch {
        /// Keywords to search (defaults to a built-in list)
        keywords: Vec<String>,

        /// Pause between searches in milliseconds
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Print the unprocessed Bunjang search payload
    Raw {
        /// Search keyword
        keyword: Option<String>,
    },

    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static files served at `/`
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.command {
        Commands::Serve { .. } => Level::INFO,
        _ => Level::WARN,
    };
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(default_level.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(strategy) = cli.joongna_strategy {
        config.joongna_strategy = strategy;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Search { keyword } => {
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&keyword).await?;
            println!("{}", output);
        }

        Commands::Batch { keywords, delay } => {
            if let Some(delay) = delay {
                config.batch_delay_ms = delay;
            }

            let cmd = BatchCommand::new(config);
            let report = cmd.execute(&keywords).await?;
            println!("{}", report.render());

            if !report.all_succeeded() {
                let total = report.keywords.len();
                bail!("{} of {} searches failed", total - report.success_count(), total);
            }
        }

        Commands::Raw { keyword } => {
            let cmd = RawCommand::new(config);
            let output = cmd.execute(keyword.as_deref()).await?;
            println!("{}", output);
        }

        Commands::Serve { port, static_dir } => {
            if let Some(port) = port {
                config.port = port;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }

            ServeCommand::new(config).execute().await?;
        }
    }

    Ok(())
}
