mod lookup;
mod product;
mod user;

pub use self::lookup::{LookupRepository, LookupRepositoryPair};
pub use self::product::ProductRepository;
pub use self::user::UserRepository;
