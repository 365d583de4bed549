//! Report what the loaded curriculum contains.

use anyhow::Result;
use chrono::Duration;
use colored::Colorize;
use curriculum_core::state::Lifecycle;
use curriculum_core::time::pretty_duration;
use curriculum_store::{DataProvider, StoreProvider};

pub fn execute(provider: &StoreProvider, lifecycle: &Lifecycle, load_time: Duration) -> Result<()> {
    let stats = provider.stats();

    println!(
        "{} Curriculum loaded in {}",
        "✓".green().bold(),
        pretty_duration(load_time)
    );

    println!("\n{}:", "Contents".green().bold());
    println!("  Superblocks: {}", stats.superblocks);
    println!("  Blocks: {}", stats.blocks);
    println!("  Challenges: {}", stats.challenges);
    println!("  Certifications: {}", stats.certifications);

    let missing: Vec<_> = provider
        .curriculum()
        .certifications
        .iter()
        .filter(|id| provider.superblock(id.as_str()).is_none())
        .collect();
    if !missing.is_empty() {
        println!("\n{}:", "Retired certifications".yellow().bold());
        for id in missing {
            println!("  • {}", id);
        }
    }

    println!("\n{}:", "Process".green().bold());
    println!("  Ready: {}", lifecycle.is_ready());
    println!("  Started: {}", lifecycle.start_time().to_rfc3339());
    println!("  Uptime: {}", pretty_duration(lifecycle.uptime()));

    Ok(())
}
