//! Pickle daemon - HTTP API for saving and asking about memories

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pickle_server::config::Config;
use pickle_server::error::Result;
use pickle_server::oracle::HybridAnswerer;
use pickle_server::server::ApiServer;
use pickle_server::storage::JsonStore;

/// Pickle - save memories and ask questions about them
#[derive(Parser)]
#[command(name = "pickle")]
#[command(about = "Save personal memories and ask questions about them")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from config
    #[arg(long, short = 'd', global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API (default command)
    #[command(name = "serve")]
    Serve,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Serve) => serve(cli.config, cli.data_dir).await,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pickle_server=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<()> {
    tracing::info!("Starting Pickle daemon");

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir;
    }
    tracing::debug!("Config loaded: {:?}", config);

    let data_dir = &config.storage.data_dir;
    tracing::info!("Opening memory store at: {}", data_dir.display());
    let store = JsonStore::open(data_dir).await?;

    let answerer = HybridAnswerer::from_config(&config);

    let server = ApiServer::new(
        config.server.clone(),
        Arc::new(TokioMutex::new(store)),
        Arc::new(answerer),
    );

    server.serve().await?;

    tracing::info!("Pickle daemon stopped");
    Ok(())
}
