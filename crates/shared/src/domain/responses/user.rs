use crate::model::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RegisterResponse {
    pub id: i64,
}

// model to response
impl From<User> for RegisterResponse {
    fn from(value: User) -> Self {
        RegisterResponse { id: value.id }
    }
}
