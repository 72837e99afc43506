use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::output::print_value;
use crate::state::State;

pub fn show(state_path: &Path, format: OutputFormat) -> Result<()> {
    let state = State::load(state_path)?;
    match format {
        OutputFormat::Json => print_value(&state.redacted(), format),
        OutputFormat::Table => {
            let rows: Vec<Value> = state
                .resources
                .iter()
                .map(|(address, entry)| {
                    serde_json::json!({
                        "id": entry.id(),
                        "name": address.to_string(),
                        "updated_at": entry.record.get("updated_at"),
                    })
                })
                .collect();
            print_value(&Value::Array(rows), format)
        }
    }
}
