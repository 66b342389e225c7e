use crate::config::ConnectionPool;
use sqlx::SqliteConnection;
use tracing::info;

pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    )
"#;

pub const CREATE_CATEGORIES: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    )
"#;

pub const CREATE_LOCATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    )
"#;

/// Normalized product layout. `{table}` is `products` at bootstrap and
/// `products_new` when the migration builds its shadow table.
const PRODUCTS_TEMPLATE: &str = r#"
    CREATE TABLE IF NOT EXISTS {table} (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category_id INTEGER,
        quantity INTEGER,
        location_id INTEGER,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL,
        FOREIGN KEY(location_id) REFERENCES locations(id) ON DELETE SET NULL
    )
"#;

pub const CREATE_TRANSACTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id INTEGER,
        change INTEGER,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(product_id) REFERENCES products(id)
    )
"#;

pub fn create_products_sql(table: &str) -> String {
    PRODUCTS_TEMPLATE.replace("{table}", table)
}

/// Creates every table the server needs, leaving existing tables untouched.
pub async fn bootstrap_schema(pool: &ConnectionPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    bootstrap_on(&mut conn).await?;

    info!("🧱 Store schema ready");
    Ok(())
}

pub(crate) async fn bootstrap_on(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for statement in [CREATE_USERS, CREATE_CATEGORIES, CREATE_LOCATIONS] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    sqlx::query(&create_products_sql("products"))
        .execute(&mut *conn)
        .await?;

    sqlx::query(CREATE_TRANSACTIONS).execute(&mut *conn).await?;

    Ok(())
}
