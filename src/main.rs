use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod backend;
mod cli;
mod config;
mod menu;
mod tui;
mod workflow;

use cli::Cli;

#[tokio::main]
async fn main() {
    // Leave the alternate screen before reporting, or the message is lost
    std::panic::set_hook(Box::new(|panic_info| {
        tui::force_restore_terminal();
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        std::process::exit(1);
    }));

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    if let Err(e) = execute().await {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn execute() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config().await?;

    // Interactive mode owns the terminal, so logs go to a file there
    if cli.is_interactive() {
        init_logging(cli.debug, Some(&cli.log_file(&config)))?;
    } else {
        init_logging(cli.debug, None)?;
    }

    cli.execute(config).await
}

fn init_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let env_filter = if debug {
        EnvFilter::new("ucc_ide=debug")
    } else {
        EnvFilter::try_from_env("UCC_LOG").unwrap_or_else(|_| EnvFilter::new("ucc_ide=info"))
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
