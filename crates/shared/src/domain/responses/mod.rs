mod lookup;
mod product;
mod sync;
mod token;
mod user;

pub use self::lookup::LookupResponse;
pub use self::product::{ChangesResponse, CreatedResponse, ProductResponse};
pub use self::sync::{SyncFailure, SyncResponse};
pub use self::token::TokenResponse;
pub use self::user::RegisterResponse;
