use anyhow::{Context, Result};
use dotenv::dotenv;
use inventory::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager},
    schema::bootstrap_schema,
    utils::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    init_logger("inventory", is_dev, is_enable_file);

    let config = Config::init().context("Failed to load configuration")?;

    let pool = ConnectionManager::new_pool(&config.database_url)
        .await
        .context("Failed to open the store")?;

    bootstrap_schema(&pool)
        .await
        .context("Failed to create store schema")?;

    let state = AppState::new(pool.clone(), &config.jwt_secret, config.bcrypt_cost)
        .await
        .context("Failed to create AppState")?;

    if let Some(initial) = &config.initial_user {
        state
            .di_container
            .auth_service
            .register
            .ensure_user(&initial.username, &initial.password)
            .await
            .context("Failed to seed initial user")?;
    }

    info!("🚀 Server started successfully");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down server...");
    pool.close().await;

    Ok(())
}
