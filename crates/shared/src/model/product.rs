use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row joined with its category and location names.
#[derive(Debug, Deserialize, Serialize, FromRow, Clone)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct SyncOutcome {
    pub inserted: usize,
    pub failures: Vec<(usize, String)>,
}

impl SyncOutcome {
    pub fn is_committed(&self) -> bool {
        self.failures.is_empty()
    }
}
