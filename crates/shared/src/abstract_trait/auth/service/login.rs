use crate::{
    domain::{requests::LoginRequest, responses::TokenResponse},
    errors::ServiceError,
};

use async_trait::async_trait;
use std::sync::Arc;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ServiceError>;
}
