use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tideline_provider::Provider;

use crate::declared::Address;
use crate::output::print_success;
use crate::state::State;

/// Deletes every recorded resource in reverse address order. Each removal
/// is saved before the next call; a failure leaves the rest recorded.
pub async fn destroy_all(provider: &Provider, state_path: &Path) -> Result<Vec<Address>> {
    let mut state = State::load(state_path)?;
    let addresses: Vec<Address> = state.resources.keys().rev().cloned().collect();
    let mut destroyed = Vec::with_capacity(addresses.len());

    for address in addresses {
        let Some(entry) = state.get(&address) else {
            continue;
        };
        provider
            .resource_for(address.kind)?
            .delete(entry.record.clone())
            .await
            .with_context(|| format!("Failed to delete {address}"))?;
        state.remove(&address);
        state.save(state_path)?;
        destroyed.push(address);
    }
    Ok(destroyed)
}

pub async fn destroy(provider: &Provider, state_path: &Path) -> Result<()> {
    let destroyed = destroy_all(provider, state_path).await?;
    for address in &destroyed {
        println!("  {} {}", "Deleted".red(), address.to_string().cyan());
    }
    print_success(&format!("Destroyed {} resource(s)", destroyed.len()));
    Ok(())
}
