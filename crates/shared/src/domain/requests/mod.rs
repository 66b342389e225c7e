mod auth;
mod lookup;
mod product;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::lookup::CreateLookupRequest;
pub use self::product::{CreateProductRequest, SyncProductRequest, UpdateProductRequest};
