use anyhow::Result;
use colored::Colorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::plan::Plan;

pub fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => print_as_table(value),
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Table => {
            if plan.changes.is_empty() {
                println!("Nothing declared and nothing recorded.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Address", "Action"]);
            for change in &plan.changes {
                builder.push_record([change.address.to_string(), change.action.to_string()]);
            }
            println!("{}", builder.build().with(Style::rounded()));
        }
    }
    println!("{}", styled_summary(plan));
    Ok(())
}

fn styled_summary(plan: &Plan) -> String {
    if !plan.has_changes() {
        return "No changes.".green().to_string();
    }
    format!("{}: {}", "Plan".cyan(), plan.summary())
}

fn print_as_table(value: &Value) {
    match value {
        Value::Array(items) => print_entities(items),
        Value::Object(_) => print_fields(value),
        other => println!("{other}"),
    }
}

/// One row per entity.
fn print_entities(items: &[Value]) {
    if items.is_empty() {
        println!("No resources found.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Updated"]);
    for item in items {
        builder.push_record([
            text(item.get("id")),
            text(item.get("name")),
            text(item.get("updated_at")),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    println!("Total: {}", items.len());
}

/// Key-value rows for a single entity.
fn print_fields(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let Some(map) = value.as_object() else {
        return;
    };
    for (key, field) in map {
        builder.push_record([key.clone(), text(Some(field))]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::declared::Declared;
    use crate::state::State;

    #[test]
    fn test_text_cells() {
        assert_eq!(text(None), "-");
        assert_eq!(text(Some(&json!(""))), "-");
        assert_eq!(text(Some(&json!("Ada"))), "Ada");
        assert_eq!(text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
        assert_eq!(text(Some(&json!(0.5))), "0.5");
    }

    #[test]
    fn test_plan_summary_line() {
        let declared = Declared::parse("[bot.new]\nname = \"New\"").unwrap();
        let plan = Plan::compute(&declared, &State::default(), |_, _| Ok(true)).unwrap();
        let line = styled_summary(&plan);
        assert!(line.ends_with("1 to create, 0 to update, 0 to delete, 0 unchanged"));

        let empty =
            Plan::compute(&Declared::default(), &State::default(), |_, _| Ok(true)).unwrap();
        assert!(styled_summary(&empty).contains("No changes."));
    }
}
