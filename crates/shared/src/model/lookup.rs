use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Deserialize, Serialize, FromRow, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

/// The two name tables a product points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Category,
    Location,
}

impl LookupKind {
    pub const ALL: [LookupKind; 2] = [LookupKind::Category, LookupKind::Location];

    pub fn table(self) -> &'static str {
        match self {
            LookupKind::Category => "categories",
            LookupKind::Location => "locations",
        }
    }

    /// Name substituted when a product arrives without one.
    pub fn default_name(self) -> &'static str {
        match self {
            LookupKind::Category => "Sin Categoría",
            LookupKind::Location => "Sin Ubicación",
        }
    }

    /// Legacy free-text column on `products`.
    pub fn legacy_column(self) -> &'static str {
        match self {
            LookupKind::Category => "category",
            LookupKind::Location => "location",
        }
    }

    /// Foreign-key column on `products`.
    pub fn id_column(self) -> &'static str {
        match self {
            LookupKind::Category => "category_id",
            LookupKind::Location => "location_id",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Category => write!(f, "category"),
            LookupKind::Location => write!(f, "location"),
        }
    }
}
