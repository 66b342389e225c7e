use crate::{
    abstract_trait::{DynLookupRepository, LookupServiceTrait},
    domain::{requests::CreateLookupRequest, responses::LookupResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Resource, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Listing and explicit creation for categories or locations.
pub struct LookupService {
    repository: DynLookupRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl LookupService {
    pub async fn new(
        repository: DynLookupRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let table = repository.kind().table();

        registry.lock().await.register(
            format!("{table}_service_request_counter"),
            format!("Total number of requests to the {table} service"),
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            format!("{table}_service_request_duration"),
            format!("Histogram of request durations for the {table} service"),
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            repository,
            metrics,
        }
    }
}

#[async_trait]
impl LookupServiceTrait for LookupService {
    async fn find_all(&self) -> Result<Vec<LookupResponse>, ServiceError> {
        let kind = self.repository.kind();
        let tracing_ctx =
            TracingContext::start(Resource::from(kind), &format!("FindAll {kind}"));

        match self.repository.find_all().await {
            Ok(rows) => {
                info!("📋 Found {} {kind} row(s)", rows.len());
                tracing_ctx
                    .complete(&self.metrics, Method::Get, true, "Listed lookup rows")
                    .await;
                Ok(rows.into_iter().map(LookupResponse::from).collect())
            }
            Err(err) => {
                error!("❌ Failed to list {kind} rows: {err}");
                tracing_ctx
                    .complete(&self.metrics, Method::Get, false, "Failed to list lookup rows")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn create(&self, req: &CreateLookupRequest) -> Result<LookupResponse, ServiceError> {
        let kind = self.repository.kind();
        let tracing_ctx =
            TracingContext::start(Resource::from(kind), &format!("Create {kind}"));

        if req.name.is_empty() {
            tracing_ctx
                .complete(&self.metrics, Method::Post, false, "Missing name")
                .await;
            return Err(ServiceError::Validation(vec!["Name is required".into()]));
        }

        match self.repository.create(&req.name).await {
            Ok(row) => {
                info!("✅ Created {kind} '{}' with id {}", row.name, row.id);
                tracing_ctx
                    .complete(&self.metrics, Method::Post, true, "Created lookup row")
                    .await;
                Ok(LookupResponse::from(row))
            }
            Err(err) => {
                error!("❌ Failed to create {kind} '{}': {err}", req.name);
                tracing_ctx
                    .complete(&self.metrics, Method::Post, false, "Failed to create lookup row")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
