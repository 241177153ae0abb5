use clap::Args;
use dynamo_table::{DynamoConfig, Table, build_client};
use tokio_util::sync::CancellationToken;

use crate::OutputFormat;
use crate::commands::print_outcome;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Name of the table to delete.
    #[arg(long)]
    pub table: String,
}

pub async fn run(
    config: &DynamoConfig,
    cancel: &CancellationToken,
    args: &DeleteArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let client = build_client(config).await;
    let table = Table::new(client, &args.table);

    let outcome = table.delete_if_exists(cancel).await?;

    print_outcome(table.name(), outcome, format)
}
