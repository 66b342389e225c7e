use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SyncResponse {
    pub message: String,
    pub inserted: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SyncFailure {
    pub index: usize,
    #[schema(value_type = Object)]
    pub product: Value,
    pub error: String,
}
