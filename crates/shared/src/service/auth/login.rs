use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynUserQueryRepository, LoginServiceTrait},
    domain::{requests::LoginRequest, responses::TokenResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Resource, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub query: DynUserQueryRepository,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            hash,
            jwt,
            query,
            metrics,
            registry,
        } = deps;

        registry.lock().await.register(
            "login_service_request_counter",
            "Total number of requests to the LoginService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            "login_service_request_duration",
            "Histogram of request durations for the LoginService",
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            hash,
            jwt,
            query,
            metrics,
        }
    }

    async fn complete_tracing_success(&self, ctx: &TracingContext, message: &str) {
        ctx.complete(&self.metrics, Method::Post, true, message).await;
    }

    async fn complete_tracing_error(&self, ctx: &TracingContext, message: &str) {
        ctx.complete(&self.metrics, Method::Post, false, message).await;
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let username = &request.username;
        info!("🔐 Attempting login for user: {username}");

        let tracing_ctx = TracingContext::start(Resource::Auth, "Login");

        let user = match self.query.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("❌ User not found: {username}");
                self.complete_tracing_error(&tracing_ctx, "User not found")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                error!("❌ Failed to query user: {err}");
                self.complete_tracing_error(&tracing_ctx, "Database error")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self
            .hash
            .compare_password(&user.password, &request.password)
            .await
        {
            error!("❌ Invalid password for user: {username}");
            self.complete_tracing_error(&tracing_ctx, "Invalid password")
                .await;
            return Err(match err {
                ServiceError::Bcrypt(_) => ServiceError::InvalidCredentials,
                other => other,
            });
        }

        let token = match self.jwt.generate_token(user.id, &user.username) {
            Ok(token) => token,
            Err(err) => {
                error!("❌ Failed to generate token: {err}");
                self.complete_tracing_error(&tracing_ctx, "Failed to generate token")
                    .await;
                return Err(err);
            }
        };

        info!("✅ Login successful for user: {username}");
        self.complete_tracing_success(&tracing_ctx, "Login successful")
            .await;

        Ok(TokenResponse { token })
    }
}
