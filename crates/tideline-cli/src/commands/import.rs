use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use tideline_core::ResourceKind;
use tideline_provider::Provider;

use crate::declared::Address;
use crate::output::print_success;
use crate::state::State;

/// Adopts the remote entity `id` under `kind.name`: Import, then Read to
/// fill in its attributes. Returns the stored record.
pub async fn import_resource(
    provider: &Provider,
    state_path: &Path,
    kind: ResourceKind,
    name: &str,
    id: &str,
) -> Result<Value> {
    let address = Address::new(kind, name)?;
    let mut state = State::load(state_path)?;
    if let Some(existing) = state.get(&address) {
        anyhow::bail!(
            "{address} is already managed (id {})",
            existing.id().unwrap_or("-")
        );
    }

    let resource = provider.resource_for(kind)?;
    let seeded = resource.import(id)?;
    let record = resource
        .read(seeded)
        .await
        .with_context(|| format!("Failed to import {address}"))?
        .with_context(|| format!("{kind} {id} does not exist remotely"))?;

    state.insert(address, record.clone());
    state.save(state_path)?;
    Ok(record)
}

pub async fn import(
    provider: &Provider,
    state_path: &Path,
    kind: ResourceKind,
    name: &str,
    id: &str,
) -> Result<()> {
    import_resource(provider, state_path, kind, name, id).await?;
    print_success(&format!(
        "Imported {} as {}",
        format!("{kind}/{id}").cyan(),
        format!("{kind}.{name}").cyan()
    ));
    Ok(())
}
