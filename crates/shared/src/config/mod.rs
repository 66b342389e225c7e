mod database;
mod hashing;
mod jwt;
mod myconfig;

pub use self::database::{ACQUIRE_TIMEOUT, ConnectionManager, ConnectionPool, rollback};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig};
pub use self::myconfig::{Config, InitialUser};
