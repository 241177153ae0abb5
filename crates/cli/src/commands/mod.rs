pub mod create;
pub mod delete;
pub mod render;

use dynamo_table::Outcome;

use crate::OutputFormat;

fn outcome_message(table: &str, outcome: Outcome) -> String {
    match outcome {
        Outcome::Created => format!("+ Created table: {table}"),
        Outcome::AlreadyExists => format!("= Table '{table}' already exists"),
        Outcome::Deleted => format!("- Deleted table: {table}"),
        Outcome::NotFound => format!("= Table '{table}' does not exist"),
    }
}

pub fn print_outcome(table: &str, outcome: Outcome, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "table": table,
                "outcome": outcome.as_str(),
                "changed": outcome.changed(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => println!("{}", outcome_message(table, outcome)),
    }
    Ok(())
}
