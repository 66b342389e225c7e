use crate::model::Lookup;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub id: i64,
    pub name: String,
}

impl From<Lookup> for LookupResponse {
    fn from(value: Lookup) -> Self {
        LookupResponse {
            id: value.id,
            name: value.name,
        }
    }
}
