//! Subcommand implementations

pub mod check;
pub mod data;
pub mod resource;
pub mod schema;

use anyhow::{Context as _, Result};
use ctclient::Client;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::Context;
use crate::config::ProviderConfig;
use crate::provider;
use crate::state::ResourceState;

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read a JSON document from a file, or from stdin for `-`
pub fn read_document(path: &Path) -> Result<Value> {
    let content = if is_stdin(path) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Could not read stdin")?;
        content
    } else {
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn read_state(path: &Path) -> Result<ResourceState> {
    ResourceState::from_value(read_document(path)?)
        .with_context(|| format!("Invalid state document in {}", path.display()))
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Effective provider settings: config file, then environment and flags
pub fn load_config(ctx: &Context) -> Result<ProviderConfig> {
    Ok(ProviderConfig::load(ctx.config.as_deref())?.merge(&ctx.overrides))
}

/// An authenticated client
pub fn connect(ctx: &Context) -> Result<Client> {
    provider::configure(&load_config(ctx)?)
}

/// What kind of API failure sits somewhere in the error chain, and what
/// to do about it
pub fn hint(err: &anyhow::Error) -> Option<String> {
    let category = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ctclient::Error>())?
        .category();
    Some(format!("{category}: {}", category.advice()))
}
