use anyhow::Result;
use serde_json::Value;
use tideline_core::ResourceKind;
use tideline_provider::Provider;

use crate::cli::OutputFormat;
use crate::output::print_value;

pub async fn get(
    provider: &Provider,
    kind: ResourceKind,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let entity = provider.lookup_for(kind)?.fetch_one(id).await?;
    print_value(&entity, format)
}

pub async fn list(provider: &Provider, kind: ResourceKind, format: OutputFormat) -> Result<()> {
    let entities = provider.lookup_for(kind)?.fetch_all().await?;
    print_value(&Value::Array(entities), format)
}
