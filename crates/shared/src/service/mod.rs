mod auth;
mod lookup;
mod product;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::lookup::LookupService;
pub use self::product::ProductService;
