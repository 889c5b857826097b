//! Replaces drivers, routes and orders with CSV seed data.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use deliverydesk::config::{database, Config};
use deliverydesk::logger;
use deliverydesk::repository::Store;
use deliverydesk::services::import;

#[derive(Parser, Debug)]
#[command(name = "import-data", about = "Load drivers, routes and orders from CSV files")]
struct Args {
    /// Directory holding drivers.csv, routes.csv and orders.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();
    let args = Args::parse();

    let config = Config::from_env()?;
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to import data")?;

    let pool = database::create_pool(url).await?;
    database::init_db(&pool).await?;
    let store = Store::postgres(pool);

    let summary = import::import_dir(&store, &args.data_dir)
        .await
        .with_context(|| format!("import from {} failed", args.data_dir.display()))?;

    tracing::info!(
        drivers = summary.drivers,
        routes = summary.routes,
        orders = summary.orders,
        "All data imported"
    );
    Ok(())
}
