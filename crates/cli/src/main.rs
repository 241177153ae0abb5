//! dynamo-table CLI
//!
//! Renders, creates and deletes `DynamoDB` tables described by TOML manifests.

mod commands;

use clap::{Parser, Subcommand};
use dynamo_table::DynamoConfig;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Provision `DynamoDB` tables idempotently.
#[derive(Parser, Debug)]
#[command(name = "dynamo-table", version, about)]
struct Cli {
    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1", global = true)]
    region: String,

    /// Endpoint URL override (e.g. `DynamoDB` Local).
    #[arg(long, env = "AWS_ENDPOINT_URL", global = true)]
    endpoint_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the create request a manifest renders to, without sending it.
    Render(commands::render::RenderArgs),
    /// Create the manifest's table unless it already exists.
    Create(commands::create::CreateArgs),
    /// Delete a table if it exists.
    Delete(commands::delete::DeleteArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DynamoConfig::new(&cli.region);
    let config = match cli.endpoint_url {
        Some(ref url) => config.with_endpoint_url(url),
        None => config,
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling request");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Command::Render(args) => commands::render::run(&args, &cli.format),
        Command::Create(args) => commands::create::run(&config, &cancel, &args, &cli.format).await,
        Command::Delete(args) => commands::delete::run(&config, &cancel, &args, &cli.format).await,
    }
}
