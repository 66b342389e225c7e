use crate::{
    domain::{
        requests::{CreateProductRequest, SyncProductRequest, UpdateProductRequest},
        responses::{ChangesResponse, CreatedResponse, SyncResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::SyncOutcome,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<i64, RepositoryError>;
    async fn update_product(&self, req: &UpdateProductRequest) -> Result<u64, RepositoryError>;
    async fn delete_product(&self, id: i64) -> Result<u64, RepositoryError>;

    /// Replaces the whole products table with `records` in one transaction.
    /// Per-record failures are collected; when any occur nothing is committed.
    async fn sync_products(
        &self,
        records: &[SyncProductRequest],
    ) -> Result<SyncOutcome, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreatedResponse, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ChangesResponse, ServiceError>;
    async fn delete_product(&self, id: i64) -> Result<ChangesResponse, ServiceError>;
    async fn sync_products(&self, records: Vec<Value>) -> Result<SyncResponse, ServiceError>;
}
