#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDateTime;
use prometheus_client::registry::Registry;
use shared::{
    config::{ConnectionManager, ConnectionPool},
    domain::requests::{CreateProductRequest, SyncProductRequest},
    repository::{LookupRepositoryPair, ProductRepository},
    schema::bootstrap_schema,
    service::ProductService,
    utils::Metrics,
};
use sqlx::FromRow;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Raw `products` row, ids instead of names.
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub quantity: Option<i64>,
    pub location_id: Option<i64>,
}

/// Row of the `transactions` stock history table.
#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub product_id: Option<i64>,
    pub change: i64,
    pub timestamp: Option<NaiveDateTime>,
}

pub async fn history(pool: &ConnectionPool) -> Result<Vec<HistoryRow>> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        "SELECT id, product_id, change, timestamp FROM transactions ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn memory_pool() -> Result<ConnectionPool> {
    let pool = ConnectionManager::new_pool("sqlite::memory:").await?;
    bootstrap_schema(&pool).await?;
    Ok(pool)
}

pub fn product_repository(pool: &ConnectionPool) -> ProductRepository {
    ProductRepository::new(pool.clone(), LookupRepositoryPair::new(pool.clone()))
}

pub async fn product_service(pool: &ConnectionPool) -> Result<ProductService> {
    let repository = product_repository(pool);
    let metrics = Arc::new(Mutex::new(Metrics::new()));
    let registry = Arc::new(Mutex::new(Registry::default()));

    ProductService::new(repository.query, repository.command, metrics, registry).await
}

pub fn create_request(
    name: &str,
    category: Option<&str>,
    quantity: Option<i64>,
    location: Option<&str>,
) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        category: category.map(str::to_string),
        quantity,
        location: location.map(str::to_string),
    }
}

pub fn sync_record(id: Option<i64>, name: Option<&str>) -> SyncProductRequest {
    SyncProductRequest {
        id,
        name: name.map(str::to_string),
        quantity: Some(1),
        ..Default::default()
    }
}

pub async fn count(pool: &ConnectionPool, sql: &str) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?)
}
