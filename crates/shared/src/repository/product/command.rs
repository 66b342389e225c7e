use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::{ConnectionPool, rollback},
    domain::requests::{CreateProductRequest, SyncProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::SyncOutcome,
    repository::LookupRepositoryPair,
};
use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::{error, info, warn};

pub struct ProductCommandRepository {
    db: ConnectionPool,
    lookups: LookupRepositoryPair,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool, lookups: LookupRepositoryPair) -> Self {
        Self { db, lookups }
    }

    async fn resolve_lookups(
        &self,
        conn: &mut SqliteConnection,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<(i64, i64), RepositoryError> {
        let category_id = self.lookups.category.resolve(conn, category).await?;
        let location_id = self.lookups.location.resolve(conn, location).await?;

        Ok((category_id, location_id))
    }

    async fn insert_product(
        &self,
        conn: &mut SqliteConnection,
        req: &CreateProductRequest,
    ) -> Result<i64, RepositoryError> {
        let (category_id, location_id) = self
            .resolve_lookups(conn, req.category.as_deref(), req.location.as_deref())
            .await?;

        let id = sqlx::query(
            r#"
            INSERT INTO products (name, category_id, quantity, location_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&req.name)
        .bind(category_id)
        .bind(req.quantity)
        .bind(location_id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .last_insert_rowid();

        // Best effort.
        if let Err(err) = sqlx::query("INSERT INTO transactions (product_id, change) VALUES (?, ?)")
            .bind(id)
            .bind(req.quantity)
            .execute(&mut *conn)
            .await
        {
            warn!("⚠️ Failed to record stock history for product {id}: {err}");
        }

        Ok(id)
    }

    async fn apply_update(
        &self,
        conn: &mut SqliteConnection,
        req: &UpdateProductRequest,
    ) -> Result<u64, RepositoryError> {
        let (category_id, location_id) = self
            .resolve_lookups(conn, req.category.as_deref(), req.location.as_deref())
            .await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, category_id = ?, quantity = ?, location_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&req.name)
        .bind(category_id)
        .bind(req.quantity)
        .bind(location_id)
        .bind(req.id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result.rows_affected())
    }

    async fn remove_product(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<u64, RepositoryError> {
        sqlx::query("UPDATE transactions SET product_id = NULL WHERE product_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected())
    }

    async fn insert_synced(
        &self,
        conn: &mut SqliteConnection,
        record: &SyncProductRequest,
    ) -> Result<(), RepositoryError> {
        let (category_id, location_id) = self
            .resolve_lookups(conn, record.category.as_deref(), record.location.as_deref())
            .await?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, category_id, quantity, location_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(record.name.as_deref())
        .bind(category_id)
        .bind(record.quantity)
        .bind(location_id)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn replace_all(
        &self,
        conn: &mut SqliteConnection,
        records: &[SyncProductRequest],
    ) -> Result<SyncOutcome, RepositoryError> {
        // Foreign keys on transactions.product_id are checked at commit.
        sqlx::query("PRAGMA defer_foreign_keys = ON")
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        let mut outcome = SyncOutcome::default();

        for (index, record) in records.iter().enumerate() {
            match self.insert_synced(conn, record).await {
                Ok(()) => outcome.inserted += 1,
                Err(err) => {
                    error!("❌ Sync record {index} failed: {err}");
                    outcome.failures.push((index, err.to_string()));
                }
            }
        }

        if outcome.is_committed() {
            sqlx::query(
                r#"
                UPDATE transactions SET product_id = NULL
                WHERE product_id IS NOT NULL
                  AND product_id NOT IN (SELECT id FROM products)
                "#,
            )
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;
        }

        Ok(outcome)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<i64, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = self.insert_product(&mut tx, req).await;

        match result {
            Ok(id) => {
                tx.commit().await.map_err(RepositoryError::from)?;
                info!("✅ Product {id} created");
                Ok(id)
            }
            Err(err) => {
                error!("❌ Failed to create product '{}': {err}", req.name);
                rollback(tx, "create product").await;
                Err(err)
            }
        }
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<u64, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = self.apply_update(&mut tx, req).await;

        match result {
            Ok(changes) => {
                tx.commit().await.map_err(RepositoryError::from)?;
                info!("✅ Product {} updated ({changes} row(s))", req.id);
                Ok(changes)
            }
            Err(err) => {
                error!("❌ Failed to update product {}: {err}", req.id);
                rollback(tx, "update product").await;
                Err(err)
            }
        }
    }

    async fn delete_product(&self, id: i64) -> Result<u64, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = self.remove_product(&mut tx, id).await;

        match result {
            Ok(changes) => {
                tx.commit().await.map_err(RepositoryError::from)?;
                info!("🗑️ Product {id} deleted ({changes} row(s))");
                Ok(changes)
            }
            Err(err) => {
                error!("❌ Failed to delete product {id}: {err}");
                rollback(tx, "delete product").await;
                Err(err)
            }
        }
    }

    async fn sync_products(
        &self,
        records: &[SyncProductRequest],
    ) -> Result<SyncOutcome, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = self.replace_all(&mut tx, records).await;

        match result {
            Ok(outcome) if outcome.is_committed() => {
                tx.commit().await.map_err(RepositoryError::from)?;
                info!("🔄 Synced {} product(s)", outcome.inserted);
                Ok(outcome)
            }
            Ok(outcome) => {
                warn!(
                    "⚠️ Sync rejected: {} of {} record(s) failed",
                    outcome.failures.len(),
                    records.len()
                );
                rollback(tx, "sync products").await;
                Ok(outcome)
            }
            Err(err) => {
                error!("❌ Sync aborted: {err}");
                rollback(tx, "sync products").await;
                Err(err)
            }
        }
    }
}
