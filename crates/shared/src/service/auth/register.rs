use crate::{
    abstract_trait::{
        DynHashing, DynUserCommandRepository, DynUserQueryRepository, RegisterServiceTrait,
    },
    domain::{requests::RegisterRequest, responses::RegisterResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Resource, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use validator::Validate;

pub struct RegisterService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct RegisterServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let RegisterServiceDeps {
            query,
            command,
            hash,
            metrics,
            registry,
        } = deps;

        registry.lock().await.register(
            "register_service_request_counter",
            "Total number of requests to the RegisterService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            "register_service_request_duration",
            "Histogram of request durations for the RegisterService",
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            query,
            command,
            hash,
            metrics,
        }
    }

    async fn complete_tracing_success(&self, ctx: &TracingContext, message: &str) {
        ctx.complete(&self.metrics, Method::Post, true, message).await;
    }

    async fn complete_tracing_error(&self, ctx: &TracingContext, message: &str) {
        ctx.complete(&self.metrics, Method::Post, false, message).await;
    }

    async fn create(&self, username: &str, password: &str) -> Result<RegisterResponse, ServiceError> {
        let hashed = self.hash.hash_password(password).await?;
        let user = self.command.create_user(username, &hashed).await?;

        Ok(RegisterResponse::from(user))
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ServiceError> {
        info!("📝 [REGISTER] Starting user registration | Username: {}", req.username);

        let tracing_ctx = TracingContext::start(Resource::Auth, "RegisterUser");

        if let Err(errors) = req.validate() {
            self.complete_tracing_error(&tracing_ctx, "Validation failed")
                .await;
            return Err(ServiceError::from(errors));
        }

        match self.create(&req.username, &req.password).await {
            Ok(user) => {
                info!("✅ User registered successfully: {} ({})", req.username, user.id);
                self.complete_tracing_success(&tracing_ctx, "User registered successfully")
                    .await;
                Ok(user)
            }
            Err(err) => {
                error!("❌ [REGISTER] Failed to register {}: {err}", req.username);
                self.complete_tracing_error(&tracing_ctx, "Failed to register user")
                    .await;
                Err(err)
            }
        }
    }

    async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        if self.query.find_by_username(username).await?.is_some() {
            info!("👤 User {username} already present, skipping seed");
            return Ok(false);
        }

        let user = self.create(username, password).await?;
        info!("🌱 Seeded user {username} with id {}", user.id);

        Ok(true)
    }
}
