use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::inspect::{PackagesCommand, WordsCommand};
use crate::backend::{Backend, HttpBackend};
use crate::config::Config;
use crate::tui;

/// ucc-ide - browse ucc packages and words from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "ucc-ide",
    version,
    about = "Browse ucc packages and words from the terminal",
    long_about = r#"ucc-ide is a terminal front-end for the ucc editor backend.

Examples:
  ucc-ide                                   # Start interactive mode
  ucc-ide packages --json                   # Print the package list as JSON
  ucc-ide --base-url http://host:8005 words # Print the word tree of a remote backend"#
)]
pub struct Cli {
    /// Base URL of the ucc backend
    #[arg(short = 'u', long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Log file for interactive mode
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the packages the backend can open
    Packages(PackagesCommand),
    /// Print the word tree of the current package
    Words(WordsCommand),
}

impl Cli {
    /// Configuration from files and the environment, with flags applied last
    pub async fn load_config(&self) -> Result<Config> {
        let mut config = Config::init().await?;

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    pub fn log_file(&self, config: &Config) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| config.log_file())
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let backend: Arc<dyn Backend> =
            Arc::new(HttpBackend::new(&config).context("Failed to create backend client")?);

        match self.command {
            Some(Commands::Packages(cmd)) => cmd.execute(backend.as_ref()).await,
            Some(Commands::Words(cmd)) => cmd.execute(backend.as_ref()).await,
            None => {
                info!("Starting interactive mode against {}", config.base_url);
                tui::run(config, backend).await
            }
        }
    }
}
