use anyhow::Result;
use shared::{
    errors::MigrationError,
    migration::{MigrationStep, Migrator, SchemaShape, migrate_database},
};
use sqlx::{
    Connection, SqliteConnection,
    sqlite::SqliteConnectOptions,
};

async fn open() -> Result<SqliteConnection> {
    let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .await?;
    Ok(conn)
}

async fn legacy_store() -> Result<SqliteConnection> {
    let mut conn = open().await?;

    sqlx::query(
        "CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT,
            quantity INTEGER,
            location TEXT
        )",
    )
    .execute(&mut conn)
    .await?;

    for (name, category, quantity, location) in [
        ("Widget", Some("Tools"), 5, Some("Shelf A")),
        ("Bolt", Some("Tools"), 10, Some("Bin 3")),
        ("Gadget", None, 2, Some("")),
    ] {
        sqlx::query("INSERT INTO products (name, category, quantity, location) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(category)
            .bind(quantity)
            .bind(location)
            .execute(&mut conn)
            .await?;
    }

    Ok(conn)
}

async fn joined(conn: &mut SqliteConnection) -> Result<Vec<(i64, String, String, i64, String)>> {
    let rows = sqlx::query_as(
        "SELECT p.id, p.name, c.name, p.quantity, l.name
         FROM products p
         JOIN categories c ON p.category_id = c.id
         JOIN locations l ON p.location_id = l.id
         ORDER BY p.id",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

async fn table_count(conn: &mut SqliteConnection, table: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(table)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count)
}

#[tokio::test]
async fn legacy_rows_keep_their_names_after_normalization() -> Result<()> {
    let mut conn = legacy_store().await?;

    let report = Migrator::new(&mut conn).run().await?;

    assert!(report.swapped);
    assert_eq!(report.harvested_categories, 1);
    assert_eq!(report.harvested_locations, 2);
    assert_eq!(report.rows_copied, 3);
    assert_eq!(report.steps.last(), Some(&MigrationStep::RenameShadow));

    let rows = joined(&mut conn).await?;
    assert_eq!(
        rows,
        vec![
            (1, "Widget".into(), "Tools".into(), 5, "Shelf A".into()),
            (2, "Bolt".into(), "Tools".into(), 10, "Bin 3".into()),
            (3, "Gadget".into(), "Sin Categoría".into(), 2, "Sin Ubicación".into()),
        ]
    );

    let shape = SchemaShape::inspect(&mut conn).await?;
    assert!(shape.is_normalized());
    assert!(!shape.has_column("category"));
    assert!(!shape.has_column("location"));
    assert_eq!(table_count(&mut conn, "products_new").await?, 0);
    Ok(())
}

#[tokio::test]
async fn second_run_leaves_the_store_unchanged() -> Result<()> {
    let mut conn = legacy_store().await?;

    Migrator::new(&mut conn).run().await?;
    let before = joined(&mut conn).await?;

    let report = Migrator::new(&mut conn).run().await?;
    assert!(!report.swapped);
    assert_eq!(report.rows_backfilled, 0);
    assert_eq!(joined(&mut conn).await?, before);

    let categories = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut conn)
        .await?;
    assert_eq!(categories, 2);
    Ok(())
}

#[tokio::test]
async fn missing_default_aborts_before_any_destructive_step() -> Result<()> {
    let mut conn = legacy_store().await?;

    sqlx::query("CREATE TABLE categories (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE NOT NULL)")
        .execute(&mut conn)
        .await?;
    sqlx::query(
        "CREATE TRIGGER swallow_default BEFORE INSERT ON categories
         WHEN NEW.name = 'Sin Categoría'
         BEGIN SELECT RAISE(IGNORE); END",
    )
    .execute(&mut conn)
    .await?;

    let result = Migrator::new(&mut conn).run().await;
    assert!(matches!(
        result,
        Err(MigrationError::DefaultLookupMissing { table: "categories", .. })
    ));

    let shape = SchemaShape::inspect(&mut conn).await?;
    assert!(shape.has_column("category"));
    assert!(shape.has_column("location"));
    assert!(!shape.has_shadow);

    let names = sqlx::query_scalar::<_, String>("SELECT name FROM products ORDER BY id")
        .fetch_all(&mut conn)
        .await?;
    assert_eq!(names, ["Widget", "Bolt", "Gadget"]);

    let harvested = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut conn)
        .await?;
    assert_eq!(harvested, 0);
    Ok(())
}

#[tokio::test]
async fn interrupted_swap_resumes_at_rename() -> Result<()> {
    let mut conn = open().await?;

    for statement in [
        "CREATE TABLE categories (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE NOT NULL)",
        "CREATE TABLE locations (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE NOT NULL)",
        "INSERT INTO categories (name) VALUES ('Tools')",
        "INSERT INTO locations (name) VALUES ('Shelf A')",
        "CREATE TABLE products_new (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category_id INTEGER,
            quantity INTEGER,
            location_id INTEGER,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL,
            FOREIGN KEY(location_id) REFERENCES locations(id) ON DELETE SET NULL
        )",
        "INSERT INTO products_new (name, category_id, quantity, location_id) VALUES ('Widget', 1, 5, 1)",
    ] {
        sqlx::query(statement).execute(&mut conn).await?;
    }

    let report = Migrator::new(&mut conn).run().await?;

    assert!(report.swapped);
    assert_eq!(report.steps, vec![MigrationStep::RenameShadow]);
    assert_eq!(table_count(&mut conn, "products_new").await?, 0);
    assert_eq!(
        joined(&mut conn).await?,
        vec![(1, "Widget".into(), "Tools".into(), 5, "Shelf A".into())]
    );
    Ok(())
}

#[tokio::test]
async fn stale_shadow_is_rebuilt_from_the_legacy_table() -> Result<()> {
    let mut conn = legacy_store().await?;

    sqlx::query("CREATE TABLE products_new (junk TEXT)")
        .execute(&mut conn)
        .await?;

    let report = Migrator::new(&mut conn).run().await?;

    assert!(report.swapped);
    assert_eq!(report.rows_copied, 3);
    assert_eq!(table_count(&mut conn, "products_new").await?, 0);
    assert_eq!(joined(&mut conn).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn empty_store_is_bootstrapped() -> Result<()> {
    let mut conn = open().await?;

    let report = Migrator::new(&mut conn).run().await?;

    assert!(report.nothing_to_migrate);
    assert!(!report.swapped);
    for table in ["users", "categories", "locations", "products", "transactions"] {
        assert_eq!(table_count(&mut conn, table).await?, 1, "{table} should exist");
    }
    assert!(SchemaShape::inspect(&mut conn).await?.is_normalized());
    Ok(())
}

#[tokio::test]
async fn history_survives_the_swap() -> Result<()> {
    let mut conn = legacy_store().await?;

    sqlx::query(
        "CREATE TABLE transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER,
            change INTEGER,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(product_id) REFERENCES products(id)
        )",
    )
    .execute(&mut conn)
    .await?;
    sqlx::query("INSERT INTO transactions (product_id, change) VALUES (1, 5)")
        .execute(&mut conn)
        .await?;

    Migrator::new(&mut conn).run().await?;

    let product_id = sqlx::query_scalar::<_, Option<i64>>("SELECT product_id FROM transactions")
        .fetch_one(&mut conn)
        .await?;
    assert_eq!(product_id, Some(1));
    Ok(())
}

#[tokio::test]
async fn missing_database_file_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inventory.db");
    let url = format!("sqlite://{}", path.display());

    let result = migrate_database(&url).await;

    assert!(matches!(result, Err(MigrationError::Store(_))));
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn existing_file_is_migrated_and_closed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inventory.db");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;
    sqlx::query("CREATE TABLE products (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, category TEXT, quantity INTEGER, location TEXT)")
        .execute(&mut conn)
        .await?;
    sqlx::query("INSERT INTO products (name, category, quantity, location) VALUES ('Widget', 'Tools', 5, 'Shelf A')")
        .execute(&mut conn)
        .await?;
    conn.close().await?;

    let report = migrate_database(&format!("sqlite://{}", path.display())).await?;
    assert!(report.swapped);

    let mut conn = SqliteConnection::connect_with(&options).await?;
    assert_eq!(
        joined(&mut conn).await?,
        vec![(1, "Widget".into(), "Tools".into(), 5, "Shelf A".into())]
    );
    conn.close().await?;
    Ok(())
}
