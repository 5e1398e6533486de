//! storsmoke - Azure Storage provisioning walkthrough
//!
//! Provisions a resource group and a storage account, then inspects,
//! rekeys, and updates the account in a fixed fail-fast sequence.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod arm;
mod auth;
mod cli;
mod config;
mod environment;
mod error;
mod pipeline;
mod utils;

use crate::cli::Cli;
use crate::error::Result;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    cli.execute().await
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storsmoke=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
