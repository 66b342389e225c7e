use crate::{
    domain::{requests::CreateLookupRequest, responses::LookupResponse},
    errors::{RepositoryError, ServiceError},
    model::{Lookup as LookupModel, LookupKind},
};
use async_trait::async_trait;
use sqlx::SqliteConnection;
use std::sync::Arc;

pub type DynLookupRepository = Arc<dyn LookupRepositoryTrait + Send + Sync>;
pub type DynLookupService = Arc<dyn LookupServiceTrait + Send + Sync>;

#[async_trait]
pub trait LookupRepositoryTrait {
    fn kind(&self) -> LookupKind;

    async fn find_all(&self) -> Result<Vec<LookupModel>, RepositoryError>;

    async fn create(&self, name: &str) -> Result<LookupModel, RepositoryError>;

    /// Get-or-create on the caller's connection. A blank or missing name
    /// resolves to the kind's default row.
    async fn resolve(
        &self,
        conn: &mut SqliteConnection,
        name: Option<&str>,
    ) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait LookupServiceTrait {
    async fn find_all(&self) -> Result<Vec<LookupResponse>, ServiceError>;
    async fn create(&self, req: &CreateLookupRequest) -> Result<LookupResponse, ServiceError>;
}
