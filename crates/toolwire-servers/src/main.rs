//! toolwire: stdio tool workers entry point.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use toolwire::config::{load_config, resolve_config_path};
use toolwire::{ServerConfig, ShutdownFlag, StdioTransport};
use toolwire_servers::Worker;

#[derive(Parser)]
#[command(
    name = "toolwire",
    about = "Content-Length framed JSON-RPC tool workers over stdio",
    version
)]
struct Cli {
    /// Configuration file path (falls back to $TOOLWIRE_CONFIG).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the filesystem worker over stdio.
    Filesystem,

    /// Serve the command worker over stdio.
    Command,

    /// Serve the echo worker over stdio.
    Echo,

    /// Serve the tool-less memory store worker over stdio.
    MemoryStore,

    /// Print a worker's initialize result as JSON.
    Info {
        /// Worker to describe.
        #[arg(value_enum)]
        worker: Worker,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = load_config(config_path.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(file) = cli.log_file {
        config.log_file = Some(file);
    }

    init_logging(&config)?;
    if let Some(path) = &config_path {
        tracing::debug!("Using config file {}", path.display());
    }

    let worker = match cli.command {
        Commands::Filesystem => Worker::Filesystem,
        Commands::Command => Worker::Command,
        Commands::Echo => Worker::Echo,
        Commands::MemoryStore => Worker::MemoryStore,
        Commands::Info { worker } => {
            let handler = worker.build_handler(&config)?;
            let info = handler.initialize_result();
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }
    };

    serve(worker, &config).await
}

async fn serve(worker: Worker, config: &ServerConfig) -> anyhow::Result<()> {
    let shutdown = ShutdownFlag::new();
    shutdown.install();

    let handler = worker.build_handler(config)?;
    let mut transport =
        StdioTransport::new(handler, shutdown).with_max_header_bytes(config.max_header_bytes);
    let reason = transport.run().await;

    tracing::info!(worker = %worker, reason = ?reason, "Worker exiting");
    Ok(())
}

/// Logs go to stderr or the configured file; stdout carries only frames.
fn init_logging(config: &ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
