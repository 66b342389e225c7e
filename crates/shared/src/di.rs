use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynLookupService},
    config::ConnectionPool,
    repository::{LookupRepositoryPair, ProductRepository, UserRepository},
    service::{AuthService, AuthServiceDeps, LookupService, ProductService},
    utils::Metrics,
};
use anyhow::Result;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub category_service: DynLookupService,
    pub location_service: DynLookupService,
    pub product_service: ProductService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("category_service", &"<LookupService>")
            .field("location_service", &"<LookupService>")
            .field("product_service", &"<ProductService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
            metrics,
            registry,
        } = deps;

        let user_repository = UserRepository::new(pool.clone());
        let lookups = LookupRepositoryPair::new(pool.clone());
        let product_repository = ProductRepository::new(pool.clone(), lookups.clone());

        let auth_deps = AuthServiceDeps {
            hash,
            jwt: jwt_config,
            user_query: user_repository.query,
            user_command: user_repository.command,
            metrics: metrics.clone(),
            registry: registry.clone(),
        };

        let auth_service = AuthService::new(auth_deps).await?;

        let category_service = Arc::new(
            LookupService::new(lookups.category.clone(), metrics.clone(), registry.clone()).await,
        ) as DynLookupService;

        let location_service = Arc::new(
            LookupService::new(lookups.location.clone(), metrics.clone(), registry.clone()).await,
        ) as DynLookupService;

        let product_service = ProductService::new(
            product_repository.query,
            product_repository.command,
            metrics.clone(),
            registry.clone(),
        )
        .await?;

        Ok(Self {
            auth_service,
            category_service,
            location_service,
            product_service,
        })
    }
}
