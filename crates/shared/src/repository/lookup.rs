use crate::{
    abstract_trait::{DynLookupRepository, LookupRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Lookup as LookupModel, LookupKind},
};
use async_trait::async_trait;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tracing::{info, warn};

/// Repository over one of the name tables, selected by [`LookupKind`].
pub struct LookupRepository {
    db: ConnectionPool,
    kind: LookupKind,
}

impl LookupRepository {
    pub fn new(db: ConnectionPool, kind: LookupKind) -> Self {
        Self { db, kind }
    }

    async fn find_id(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<i64>, RepositoryError> {
        let sql = format!("SELECT id FROM {} WHERE name = ?", self.kind.table());

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<i64, RepositoryError> {
        let sql = format!("INSERT INTO {} (name) VALUES (?)", self.kind.table());

        let id = sqlx::query(&sql)
            .bind(name)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from)?
            .last_insert_rowid();

        Ok(id)
    }
}

#[async_trait]
impl LookupRepositoryTrait for LookupRepository {
    fn kind(&self) -> LookupKind {
        self.kind
    }

    async fn find_all(&self) -> Result<Vec<LookupModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let sql = format!("SELECT id, name FROM {} ORDER BY id", self.kind.table());

        let rows = sqlx::query_as::<_, LookupModel>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(rows)
    }

    async fn create(&self, name: &str) -> Result<LookupModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let id = self.insert(&mut *conn, name).await?;

        Ok(LookupModel {
            id,
            name: name.to_string(),
        })
    }

    async fn resolve(
        &self,
        conn: &mut SqliteConnection,
        name: Option<&str>,
    ) -> Result<i64, RepositoryError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => self.kind.default_name(),
        };

        if let Some(id) = self.find_id(conn, name).await? {
            return Ok(id);
        }

        match self.insert(conn, name).await {
            Ok(id) => {
                info!("🆕 Created {} '{name}' with id {id}", self.kind);
                Ok(id)
            }
            // Inserted concurrently after our select.
            Err(err) if err.is_unique_violation() => {
                warn!("⚠️ {} '{name}' appeared concurrently, re-selecting", self.kind);
                self.find_id(conn, name)
                    .await?
                    .ok_or(RepositoryError::NotFound)
            }
            Err(err) => Err(err),
        }
    }
}

/// The category and location repositories the product write path resolves against.
#[derive(Clone)]
pub struct LookupRepositoryPair {
    pub category: DynLookupRepository,
    pub location: DynLookupRepository,
}

impl LookupRepositoryPair {
    pub fn new(pool: ConnectionPool) -> Self {
        let category = Arc::new(LookupRepository::new(pool.clone(), LookupKind::Category))
            as DynLookupRepository;
        let location = Arc::new(LookupRepository::new(pool.clone(), LookupKind::Location))
            as DynLookupRepository;

        Self { category, location }
    }
}
