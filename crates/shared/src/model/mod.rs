mod lookup;
mod product;
mod user;

pub use self::lookup::{Lookup, LookupKind};
pub use self::product::{ProductDetail, SyncOutcome};
pub use self::user::User;
