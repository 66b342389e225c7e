use crate::model::LookupKind;
use sqlx::SqliteConnection;

pub const PRODUCTS: &str = "products";
pub const SHADOW: &str = "products_new";

/// Snapshot of the products layout taken before each phase.
#[derive(Debug, Clone, Default)]
pub struct SchemaShape {
    pub has_products: bool,
    pub has_shadow: bool,
    pub product_columns: Vec<String>,
    pub has_foreign_keys: bool,
}

impl SchemaShape {
    pub async fn inspect(conn: &mut SqliteConnection) -> Result<Self, sqlx::Error> {
        let has_products = table_exists(conn, PRODUCTS).await?;
        let has_shadow = table_exists(conn, SHADOW).await?;

        let product_columns = if has_products {
            sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?)")
                .bind(PRODUCTS)
                .fetch_all(&mut *conn)
                .await?
        } else {
            Vec::new()
        };

        let has_foreign_keys = if has_products {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pragma_foreign_key_list(?)")
                .bind(PRODUCTS)
                .fetch_one(&mut *conn)
                .await?
                > 0
        } else {
            false
        };

        Ok(Self {
            has_products,
            has_shadow,
            product_columns,
            has_foreign_keys,
        })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.product_columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(column))
    }

    pub fn has_legacy(&self, kind: LookupKind) -> bool {
        self.has_column(kind.legacy_column())
    }

    pub fn has_any_legacy(&self) -> bool {
        LookupKind::ALL.iter().any(|kind| self.has_legacy(*kind))
    }

    /// Products already has the target layout: id columns with foreign keys
    /// and no free-text columns left.
    pub fn is_normalized(&self) -> bool {
        self.has_products
            && !self.has_any_legacy()
            && self.has_foreign_keys
            && LookupKind::ALL
                .iter()
                .all(|kind| self.has_column(kind.id_column()))
    }

    /// A drop landed but the rename did not.
    pub fn is_interrupted_swap(&self) -> bool {
        !self.has_products && self.has_shadow
    }
}

async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(table)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}
