use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog::{storage, Config, Resolver};

/// Catalog - GraphQL resolver for products and taxonomies
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run as an AWS Lambda function (default)
    Serve,
    /// Resolve a single event and print the response
    Invoke {
        /// Path to the event JSON, or `-` for stdin
        #[arg(long, short, default_value = "-")]
        event: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // JSON lines without colors, as CloudWatch expects
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=info,catalog_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .without_time(),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        product_table = %config.product_table_name,
        taxonomy_table = %config.taxonomy_table_name,
        parent_index = %config.taxonomy_parent_index,
        update_semantics = ?config.update_semantics,
        failure_policy = ?config.failure_policy,
        "Configuration loaded"
    );

    let store = storage::connect(&config)
        .await
        .context("Failed to initialize storage")?;
    let resolver = Resolver::new(&config, store);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(resolver).await,
        Command::Invoke { event } => invoke(&resolver, &event).await,
    }
}

/// Runs the Lambda runtime loop until the runtime shuts down.
async fn serve(resolver: Resolver) -> Result<()> {
    let resolver = &resolver;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, lambda_runtime::Error>(resolver.handle(event.payload).await)
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {e}"))
}

async fn invoke(resolver: &Resolver, path: &PathBuf) -> Result<()> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read event from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event from {}", path.display()))?
    };

    let event: Value = serde_json::from_str(&raw).context("Event is not valid JSON")?;
    let response = resolver.handle(event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
