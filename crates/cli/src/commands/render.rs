use std::path::PathBuf;

use clap::Args;
use dynamo_table::{CreateTableRequest, TableManifest};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the table manifest (TOML).
    #[arg(long, short)]
    pub manifest: PathBuf,
}

pub fn run(args: &RenderArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let manifest = TableManifest::load(&args.manifest)?;
    let definition = manifest.definition();
    let request = definition.render(&manifest.table_name);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&request)?),
        OutputFormat::Text => {
            for line in describe(&request) {
                println!("{line}");
            }
            for conflict in definition.attribute_conflicts() {
                eprintln!(
                    "warning: attribute '{}' declared as {} and {}; keeping {}",
                    conflict.name, conflict.kept, conflict.ignored, conflict.kept
                );
            }
        }
    }
    Ok(())
}

/// Human-readable summary of a create request.
fn describe(request: &CreateTableRequest) -> Vec<String> {
    let mut lines = vec![format!("Table: {}", request.table_name)];
    for key in &request.key_schema {
        lines.push(format!("  {} key: {}", key.key_type, key.attribute_name));
    }
    for attr in &request.attribute_definitions {
        lines.push(format!(
            "  Attribute: {} ({})",
            attr.attribute_name, attr.attribute_type
        ));
    }
    lines.push(format!("  Billing: {}", request.billing_mode));
    if let Some(throughput) = &request.provisioned_throughput {
        lines.push(format!(
            "  Throughput: read={} write={}",
            throughput.read_capacity_units, throughput.write_capacity_units
        ));
    }
    if let Some(stream) = &request.stream_specification {
        lines.push(format!("  Stream: {}", stream.stream_view_type));
    }
    for index in &request.global_secondary_indexes {
        lines.push(format!(
            "  GSI: {} ({})",
            index.index_name, index.projection.projection_type
        ));
        if let Some(throughput) = &index.provisioned_throughput {
            lines.push(format!(
                "    Throughput: read={} write={}",
                throughput.read_capacity_units, throughput.write_capacity_units
            ));
        }
    }
    for index in &request.local_secondary_indexes {
        lines.push(format!(
            "  LSI: {} ({})",
            index.index_name, index.projection.projection_type
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use dynamo_table::{
        BillingMode, IndexDefinition, ProjectionType, ScalarType, StreamViewType, TableDefinition,
    };

    use super::*;

    #[test]
    fn describes_provisioned_table() {
        let request = TableDefinition::new()
            .with_hash_key("id", ScalarType::S)
            .with_stream(StreamViewType::NewImage)
            .with_global_index(IndexDefinition::new("by_email", ProjectionType::All))
            .render("users");
        assert_eq!(
            describe(&request),
            vec![
                "Table: users",
                "  HASH key: id",
                "  Attribute: id (S)",
                "  Billing: PROVISIONED",
                "  Throughput: read=3 write=3",
                "  Stream: NEW_IMAGE",
                "  GSI: by_email (ALL)",
                "    Throughput: read=3 write=3",
            ]
        );
    }

    #[test]
    fn pay_per_request_has_no_throughput_lines() {
        let request = TableDefinition::new()
            .with_hash_key("id", ScalarType::S)
            .with_billing_mode(BillingMode::PayPerRequest)
            .render("users");
        assert!(describe(&request).iter().all(|l| !l.contains("Throughput")));
    }
}
