use crate::{
    abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        requests::{CreateProductRequest, SyncProductRequest, UpdateProductRequest},
        responses::{ChangesResponse, CreatedResponse, SyncFailure, SyncResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, Resource, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use validator::Validate;

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl ProductCommandService {
    pub async fn new(
        command: DynProductCommandRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        registry.lock().await.register(
            "product_command_service_request_counter",
            "Total number of requests to the ProductCommandService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            "product_command_service_request_duration",
            "Histogram of request durations for the ProductCommandService",
            metrics.lock().await.request_duration.clone(),
        );

        Self { command, metrics }
    }

    async fn complete_tracing_success(&self, ctx: &TracingContext, method: Method, message: &str) {
        ctx.complete(&self.metrics, method, true, message).await;
    }

    async fn complete_tracing_error(&self, ctx: &TracingContext, method: Method, message: &str) {
        ctx.complete(&self.metrics, method, false, message).await;
    }
}

fn parse_records(records: &[Value]) -> (Vec<SyncProductRequest>, Vec<SyncFailure>) {
    let mut parsed = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<SyncProductRequest>(record.clone()) {
            Ok(product) => parsed.push(product),
            Err(err) => failures.push(SyncFailure {
                index,
                product: record.clone(),
                error: err.to_string(),
            }),
        }
    }

    (parsed, failures)
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreatedResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);
        let method = Method::Post;
        let tracing_ctx = TracingContext::start(Resource::Product, "CreateProduct");

        if let Err(errors) = req.validate() {
            self.complete_tracing_error(&tracing_ctx, method, "Validation failed")
                .await;
            return Err(ServiceError::from(errors));
        }

        match self.command.create_product(req).await {
            Ok(id) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product created")
                    .await;
                Ok(CreatedResponse { id })
            }
            Err(err) => {
                error!("❌ Failed to create product '{}': {err}", req.name);
                self.complete_tracing_error(&tracing_ctx, method, "Failed to create product")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ChangesResponse, ServiceError> {
        info!("✏️ Updating product {}", req.id);
        let method = Method::Put;
        let tracing_ctx = TracingContext::start(Resource::Product, "UpdateProduct");

        if let Err(errors) = req.validate() {
            self.complete_tracing_error(&tracing_ctx, method, "Validation failed")
                .await;
            return Err(ServiceError::from(errors));
        }

        match self.command.update_product(req).await {
            Ok(changes) => {
                if changes == 0 {
                    warn!("⚠️ Product {} not found, nothing updated", req.id);
                }
                self.complete_tracing_success(&tracing_ctx, method, "Product updated")
                    .await;
                Ok(ChangesResponse { changes })
            }
            Err(err) => {
                error!("❌ Failed to update product {}: {err}", req.id);
                self.complete_tracing_error(&tracing_ctx, method, "Failed to update product")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_product(&self, id: i64) -> Result<ChangesResponse, ServiceError> {
        info!("🗑️ Deleting product {id}");
        let method = Method::Delete;
        let tracing_ctx = TracingContext::start(Resource::Product, "DeleteProduct");

        match self.command.delete_product(id).await {
            Ok(changes) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product deleted")
                    .await;
                Ok(ChangesResponse { changes })
            }
            Err(err) => {
                error!("❌ Failed to delete product {id}: {err}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to delete product")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn sync_products(&self, records: Vec<Value>) -> Result<SyncResponse, ServiceError> {
        info!("🔄 Syncing {} product record(s)", records.len());
        let method = Method::Post;
        let tracing_ctx = TracingContext::start(Resource::Sync, "SyncProducts");

        let (parsed, failures) = parse_records(&records);
        if !failures.is_empty() {
            warn!("⚠️ {} sync record(s) are malformed", failures.len());
            self.complete_tracing_error(&tracing_ctx, method, "Malformed sync records")
                .await;
            return Err(ServiceError::SyncRejected(failures));
        }

        match self.command.sync_products(&parsed).await {
            Ok(outcome) if outcome.is_committed() => {
                self.complete_tracing_success(&tracing_ctx, method, "Products synced")
                    .await;
                Ok(SyncResponse {
                    message: "Sync completed successfully".to_string(),
                    inserted: outcome.inserted,
                })
            }
            Ok(outcome) => {
                let failures = outcome
                    .failures
                    .into_iter()
                    .map(|(index, error)| SyncFailure {
                        index,
                        product: records.get(index).cloned().unwrap_or(Value::Null),
                        error,
                    })
                    .collect();

                self.complete_tracing_error(&tracing_ctx, method, "Sync rolled back")
                    .await;
                Err(ServiceError::SyncRejected(failures))
            }
            Err(err) => {
                error!("❌ Sync failed: {err}");
                self.complete_tracing_error(&tracing_ctx, method, "Sync failed")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
