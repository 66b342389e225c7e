use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_quantity", skip_on_field_errors = false))]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Widget")]
    pub name: String,

    #[schema(example = "Tools")]
    pub category: Option<String>,

    #[schema(example = 5)]
    pub quantity: Option<i64>,

    #[schema(example = "Shelf A")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_quantity", skip_on_field_errors = false))]
pub struct UpdateProductRequest {
    #[serde(skip_deserializing)]
    pub id: i64,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Widget")]
    pub name: String,

    #[schema(example = "Tools")]
    pub category: Option<String>,

    #[schema(example = 5)]
    pub quantity: Option<i64>,

    #[schema(example = "Shelf A")]
    pub location: Option<String>,
}

/// One element of a sync batch. Every field is optional here; records the
/// store cannot accept fail individually inside the sync transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SyncProductRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

// Zero is rejected the same as a missing quantity.
fn check_quantity(quantity: Option<i64>) -> Result<(), ValidationError> {
    match quantity {
        Some(q) if q != 0 => Ok(()),
        _ => {
            let mut err = ValidationError::new("quantity");
            err.message = Some("Quantity is required".into());
            Err(err)
        }
    }
}

fn validate_create_quantity(req: &CreateProductRequest) -> Result<(), ValidationError> {
    check_quantity(req.quantity)
}

fn validate_update_quantity(req: &UpdateProductRequest) -> Result<(), ValidationError> {
    check_quantity(req.quantity)
}
