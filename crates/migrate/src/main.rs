use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{config::Config, migration::migrate_database, utils::init_logger};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    init_logger("migrate", is_dev, is_enable_file);

    let database_url = Config::database_url().context("Failed to load configuration")?;

    info!("🚚 Migrating products at {database_url}");

    match migrate_database(&database_url).await {
        Ok(report) => {
            if report.nothing_to_migrate {
                info!("📭 No products table found; created an empty normalized schema");
            } else {
                info!(
                    "✅ Migration finished: {} categories and {} locations harvested, {} row(s) backfilled, {} row(s) copied, swap {}",
                    report.harvested_categories,
                    report.harvested_locations,
                    report.rows_backfilled,
                    report.rows_copied,
                    if report.swapped { "applied" } else { "skipped" }
                );
            }
            Ok(())
        }
        Err(err) => {
            error!("❌ Migration aborted: {err}");
            Err(err).context("Migration aborted")
        }
    }
}
