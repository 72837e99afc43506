use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tideline_provider::Provider;

use crate::declared::Address;
use crate::output::{print_success, print_warning};
use crate::state::State;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub refreshed: Vec<Address>,
    /// Deleted out of band and removed from state.
    pub dropped: Vec<Address>,
}

/// Reads every recorded resource, saving the state after each one.
pub async fn refresh_state(
    provider: &Provider,
    state: &mut State,
    state_path: &Path,
) -> Result<RefreshReport> {
    let mut report = RefreshReport::default();
    let addresses: Vec<Address> = state.resources.keys().cloned().collect();

    for address in addresses {
        let Some(entry) = state.get(&address) else {
            continue;
        };
        let resource = provider.resource_for(address.kind)?;
        let refreshed = resource
            .read(entry.record.clone())
            .await
            .with_context(|| format!("Failed to refresh {address}"))?;

        match refreshed {
            Some(record) => {
                state.insert(address.clone(), record);
                report.refreshed.push(address);
            }
            None => {
                tracing::info!(%address, "Dropping resource deleted outside tideline");
                state.remove(&address);
                report.dropped.push(address);
            }
        }
        state.save(state_path)?;
    }
    Ok(report)
}

pub async fn refresh(provider: &Provider, state_path: &Path) -> Result<()> {
    let mut state = State::load(state_path)?;
    let report = refresh_state(provider, &mut state, state_path).await?;
    print_report(&report);
    print_success(&format!(
        "Refreshed {} resource(s)",
        report.refreshed.len().to_string().cyan()
    ));
    Ok(())
}

pub(crate) fn print_report(report: &RefreshReport) {
    for address in &report.dropped {
        print_warning(&format!(
            "{} no longer exists remotely and was removed from state",
            address.to_string().cyan()
        ));
    }
}
