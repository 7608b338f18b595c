use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use customer_directory::commands::{self, Cli};
use customer_directory::config::Config;
use customer_directory::logging;
use persistence::Store;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()?;
    logging::init_logging(&config.logging);

    info!("Starting customer directory v{}", env!("CARGO_PKG_VERSION"));

    let store = Store::connect(&config.database.into())
        .await
        .context("Failed to connect to database")?;

    let result = commands::run(&store, cli.command, cli.output).await;

    store.close().await;
    result
}
