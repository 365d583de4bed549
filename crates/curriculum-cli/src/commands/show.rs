//! Print curriculum entities as JSON.

use anyhow::{anyhow, Result};
use curriculum_store::{DataProvider, StoreProvider};
use serde::Serialize;

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn curriculum(provider: &StoreProvider) -> Result<()> {
    print_json(provider.curriculum())
}

pub fn superblock(provider: &StoreProvider, id: &str) -> Result<()> {
    let superblock = provider
        .superblock(id)
        .ok_or_else(|| anyhow!("Superblock \"{}\" not found", id))?;
    print_json(superblock)
}

pub fn block(provider: &StoreProvider, id: &str) -> Result<()> {
    let block = provider
        .block(id)
        .ok_or_else(|| anyhow!("Block \"{}\" not found", id))?;
    print_json(block)
}

pub fn challenge(provider: &StoreProvider, id: &str) -> Result<()> {
    let challenge = provider
        .challenge(id)
        .ok_or_else(|| anyhow!("Challenge \"{}\" not found", id))?;
    print_json(challenge)
}
