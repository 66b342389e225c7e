use crate::{
    domain::{requests::RegisterRequest, responses::RegisterResponse},
    errors::ServiceError,
};

use async_trait::async_trait;
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ServiceError>;

    /// Creates the user unless one with `username` already exists.
    /// Returns `true` when a row was inserted.
    async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, ServiceError>;
}
