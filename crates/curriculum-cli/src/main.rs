//! Curriculum CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use curriculum_core::log;
use curriculum_core::state::Lifecycle;
use curriculum_core::time::{measure, pretty_duration};
use curriculum_store::load_from_dir;
use std::process::ExitCode;
use tracing::{error, info};

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let app = cli.app_config()?;
    let _guard = log::init_from_config(&app.log)?;
    let lifecycle = Lifecycle::new();

    info!("Loading curriculum from {}", app.data_dir.display());
    let (loaded, load_time) = measure(load_from_dir(&app.data_dir)).await;

    let provider = match loaded {
        Ok(provider) => provider,
        Err(e) => {
            lifecycle.mark_failed(e.message.clone());
            error!("Curriculum load failed after {}", pretty_duration(load_time));
            eprintln!("{}\n{}", "Failed to load curriculum:".red().bold(), e.report().red());
            return Ok(ExitCode::FAILURE);
        }
    };

    lifecycle.mark_ready();
    info!("Curriculum ready in {}", pretty_duration(load_time));

    cli.execute(&provider, &lifecycle, load_time)?;
    Ok(ExitCode::SUCCESS)
}
