use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pickle_cli::commands::{AskCommand, ConfigCommand, MemoryCommand};
use pickle_cli::error::CliResult;
use pickle_cli::output::OutputFormat;
use pickle_server::config::Config;
use pickle_server::storage::JsonStore;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pickle-cli")]
#[command(about = "Pickle CLI - save memories and ask questions about them")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'd', global = true, help = "Path to data directory")]
    pub data_dir: Option<PathBuf>,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(
        long,
        short,
        global = true,
        default_value = "local",
        help = "Whose memories to use"
    )]
    pub user: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Memory management commands")]
    Memory(MemoryCommand),

    #[clap(about = "Ask a question about your memories")]
    Ask(AskCommand),

    #[clap(about = "Configuration commands")]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = dir;
    }

    match &cli.command {
        Command::Config(cmd) => cmd.execute(&config, cli.config.as_deref(), format),
        Command::Memory(_) | Command::Ask(_) => {
            let mut store = JsonStore::open(&config.storage.data_dir).await?;

            match &cli.command {
                Command::Memory(cmd) => cmd.execute(&mut store, &cli.user, format).await,
                Command::Ask(cmd) => cmd.execute(&store, &config, &cli.user, format).await,
                Command::Config(_) => unreachable!(),
            }
        }
    }
}

/// Logs go to stderr and stay quiet unless RUST_LOG asks for more
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
