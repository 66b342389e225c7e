use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::responses::ProductResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Resource, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl ProductQueryService {
    pub async fn new(
        query: DynProductQueryRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        registry.lock().await.register(
            "product_query_service_request_counter",
            "Total number of requests to the ProductQueryService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            "product_query_service_request_duration",
            "Histogram of request durations for the ProductQueryService",
            metrics.lock().await.request_duration.clone(),
        );

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(Resource::Product, "FindAllProducts");

        match self.query.find_all().await {
            Ok(products) => {
                info!("📦 Found {} product(s)", products.len());
                tracing_ctx
                    .complete(&self.metrics, Method::Get, true, "Listed products")
                    .await;
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(err) => {
                error!("❌ Failed to list products: {err}");
                tracing_ctx
                    .complete(&self.metrics, Method::Get, false, "Failed to list products")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
