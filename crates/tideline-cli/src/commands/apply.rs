use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tideline_provider::Provider;

use crate::cli::OutputFormat;
use crate::commands::refresh::{RefreshReport, print_report, refresh_state};
use crate::declared::{Address, Declared};
use crate::output::{print_plan, print_success};
use crate::plan::{Action, Change, Plan};
use crate::state::State;

/// Validates every declaration and diffs it against the recorded state.
/// Makes no remote call.
pub fn compute_plan(provider: &Provider, declared: &Declared, state: &State) -> Result<Plan> {
    for (address, attributes) in &declared.resources {
        provider
            .resource_for(address.kind)?
            .validate(attributes)
            .with_context(|| format!("Invalid attributes for {address}"))?;
    }
    Plan::compute(declared, state, |entry, attributes| {
        let differs = provider
            .resource_for(entry.kind)?
            .differs(&entry.record, attributes)?;
        Ok(differs)
    })
}

#[derive(Debug, Default)]
pub struct ApplyReport {
    pub refresh: RefreshReport,
    pub applied: Vec<Change>,
}

/// Refresh, plan, then execute each change in order. State is saved after
/// every successful transition; the first failure stops the run.
pub async fn apply_declared(
    provider: &Provider,
    declared: &Declared,
    state_path: &Path,
) -> Result<ApplyReport> {
    let mut state = State::load(state_path)?;
    let refresh = refresh_state(provider, &mut state, state_path).await?;
    let plan = compute_plan(provider, declared, &state)?;

    let mut applied = Vec::new();
    for change in plan.changes {
        if change.action == Action::NoOp {
            continue;
        }
        execute(provider, declared, &mut state, &change)
            .await
            .with_context(|| format!("Failed to {} {}", change.action, change.address))?;
        state.save(state_path)?;
        applied.push(change);
    }
    Ok(ApplyReport { refresh, applied })
}

async fn execute(
    provider: &Provider,
    declared: &Declared,
    state: &mut State,
    change: &Change,
) -> Result<()> {
    let address = &change.address;
    let resource = provider.resource_for(address.kind)?;

    match change.action {
        Action::Create => {
            let attributes = declared_attributes(declared, address)?;
            let record = resource.create(attributes.clone()).await?;
            state.insert(address.clone(), record);
        }
        Action::Update => {
            let attributes = declared_attributes(declared, address)?;
            let current = recorded(state, address)?;
            let record = resource.update(current, attributes.clone()).await?;
            state.insert(address.clone(), record);
        }
        Action::Delete => {
            let current = recorded(state, address)?;
            resource.delete(current).await?;
            state.remove(address);
        }
        Action::NoOp => {}
    }
    Ok(())
}

fn declared_attributes<'a>(
    declared: &'a Declared,
    address: &Address,
) -> Result<&'a serde_json::Value> {
    declared
        .get(address)
        .with_context(|| format!("{address} is not declared"))
}

fn recorded(state: &State, address: &Address) -> Result<serde_json::Value> {
    state
        .get(address)
        .map(|entry| entry.record.clone())
        .with_context(|| format!("{address} is not recorded in state"))
}

pub fn plan(
    provider: &Provider,
    declared_path: &Path,
    state_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let declared = Declared::load(declared_path)?;
    let state = State::load(state_path)?;
    let plan = compute_plan(provider, &declared, &state)?;
    print_plan(&plan, format)
}

pub async fn apply(provider: &Provider, declared_path: &Path, state_path: &Path) -> Result<()> {
    let declared = Declared::load(declared_path)?;
    let report = apply_declared(provider, &declared, state_path).await?;
    print_report(&report.refresh);

    if report.applied.is_empty() {
        print_success("No changes. Remote state matches the declared file.");
        return Ok(());
    }
    for change in &report.applied {
        let verb = match change.action {
            Action::Create => "Created".green(),
            Action::Update => "Updated".yellow(),
            Action::Delete => "Deleted".red(),
            Action::NoOp => continue,
        };
        println!("  {verb} {}", change.address.to_string().cyan());
    }
    print_success(&format!("Applied {} change(s)", report.applied.len()));
    Ok(())
}
