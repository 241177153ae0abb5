use std::path::PathBuf;

use clap::Args;
use dynamo_table::{DynamoConfig, Table, TableManifest, build_client};
use tokio_util::sync::CancellationToken;

use crate::OutputFormat;
use crate::commands::print_outcome;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Path to the table manifest (TOML).
    #[arg(long, short)]
    pub manifest: PathBuf,
}

pub async fn run(
    config: &DynamoConfig,
    cancel: &CancellationToken,
    args: &CreateArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let manifest = TableManifest::load(&args.manifest)?;
    let client = build_client(config).await;
    let table = Table::new(client, &manifest.table_name);

    let outcome = table
        .create_if_not_exists(
            cancel,
            &manifest.hash_key.name,
            manifest.hash_key.attribute_type,
            manifest.table_options(),
        )
        .await?;

    print_outcome(table.name(), outcome, format)
}
