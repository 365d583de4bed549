//! CLI structure and command definitions.

use anyhow::{bail, Context, Result};
use chrono::Duration;
use clap::{Parser, Subcommand};
use curriculum_core::config::{AppConfig, Config, ENV_PREFIX};
use curriculum_core::state::Lifecycle;
use curriculum_core::util::expand_path;
use curriculum_store::StoreProvider;
use curriculum_types::LogLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curriculum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Load and inspect the curriculum store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Curriculum data directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the curriculum and report what was found
    Check,

    /// Print the curriculum manifest
    Curriculum,

    /// Print a superblock
    Superblock {
        /// Superblock id (dashed name)
        id: String,
    },

    /// Print a block
    Block {
        /// Block id (dashed name)
        id: String,
    },

    /// Print challenge metadata
    Challenge {
        /// Challenge id
        id: String,
    },
}

impl Cli {
    /// Resolve configuration: defaults, then the file, then flags, then
    /// `CURRICULUM_*` variables.
    pub fn app_config(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => {
                if !expand_path(path).is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => AppConfig::default_path(),
        };

        let mut config = match file {
            Some(path) => Config::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::new(),
        }
        .with_defaults(&AppConfig::default())?;

        if let Some(dir) = &self.data_dir {
            config.set("data_dir", dir)?;
        }
        if self.verbose {
            config.set("log.level", LogLevel::Debug)?;
        } else if self.quiet {
            config.set("log.level", LogLevel::Error)?;
        }

        let config = config.with_process_env(ENV_PREFIX);
        Ok(AppConfig::from_config(&config)?)
    }

    pub fn execute(&self, provider: &StoreProvider, lifecycle: &Lifecycle, load_time: Duration) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Check => check::execute(provider, lifecycle, load_time),
            Commands::Curriculum => show::curriculum(provider),
            Commands::Superblock { id } => show::superblock(provider, id),
            Commands::Block { id } => show::block(provider, id),
            Commands::Challenge { id } => show::challenge(provider, id),
        }
    }
}
