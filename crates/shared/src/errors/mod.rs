mod error;
mod http;
mod migration;
mod repository;
mod service;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::migration::MigrationError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
