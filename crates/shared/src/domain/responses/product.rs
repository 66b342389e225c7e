use crate::model::ProductDetail;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

impl From<ProductDetail> for ProductResponse {
    fn from(value: ProductDetail) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            category: value.category,
            quantity: value.quantity,
            location: value.location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ChangesResponse {
    pub changes: u64,
}
