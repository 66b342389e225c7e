use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateLookupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Tools")]
    pub name: String,
}
