use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{ConnectionPool, Hashing, JwtConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    utils::Metrics,
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, jwt_secret: &str, bcrypt_cost: u32) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let hash = Arc::new(Hashing::with_cost(bcrypt_cost)) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let deps = DependenciesInjectDeps {
            pool,
            hash,
            jwt_config: jwt_config.clone(),
            metrics: metrics.clone(),
            registry: registry.clone(),
        };

        let di_container = DependenciesInject::new(deps)
            .await
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            di_container,
            registry,
            metrics,
        })
    }
}
