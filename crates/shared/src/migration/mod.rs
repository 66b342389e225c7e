//! Normalization of a legacy `products` table into the foreign-key layout.
//!
//! The run is a state machine over [`MigrationStep`]. Column additions and
//! lookup-table creation are individually idempotent. Backfill runs in one
//! transaction and the table swap in a second one. A failure before the swap
//! commits leaves the original table untouched.

mod shape;
mod step;

pub use self::shape::SchemaShape;
pub use self::step::{MigrationReport, MigrationStep};

use self::shape::{PRODUCTS, SHADOW};
use crate::{errors::MigrationError, model::LookupKind, schema};
use sqlx::{
    Connection, SqliteConnection,
    sqlite::{SqliteConnectOptions, SqliteQueryResult},
};
use std::str::FromStr;
use tracing::{error, info, warn};

/// Drives one migration over a connection the caller owns.
pub struct Migrator<'c> {
    conn: &'c mut SqliteConnection,
    report: MigrationReport,
}

impl<'c> Migrator<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            conn,
            report: MigrationReport::default(),
        }
    }

    pub async fn run(mut self) -> Result<MigrationReport, MigrationError> {
        let shape = SchemaShape::inspect(self.conn).await?;
        let mut step = self.entry_step(&shape).await?;

        while step != MigrationStep::Complete {
            step = if step.is_swap() {
                self.swap(step).await?
            } else {
                let next = self.run_step(step).await?;
                self.report.steps.push(step);
                next
            };
        }

        info!("🏁 Migration complete: {:?}", self.report);
        Ok(self.report)
    }

    async fn entry_step(&mut self, shape: &SchemaShape) -> Result<MigrationStep, MigrationError> {
        if shape.is_interrupted_swap() {
            warn!("⚠️ Found {SHADOW} without {PRODUCTS}, resuming at rename");
            return Ok(MigrationStep::RenameShadow);
        }

        if !shape.has_products {
            info!("📭 No {PRODUCTS} table, bootstrapping target schema");
            schema::bootstrap_on(self.conn).await?;
            self.report.nothing_to_migrate = true;
            return Ok(MigrationStep::Complete);
        }

        Ok(MigrationStep::AddColumns)
    }

    async fn run_step(&mut self, step: MigrationStep) -> Result<MigrationStep, MigrationError> {
        match step {
            MigrationStep::AddColumns => {
                self.add_columns().await?;
                Ok(step.next())
            }
            MigrationStep::EnsureLookupTables => {
                for statement in [schema::CREATE_CATEGORIES, schema::CREATE_LOCATIONS] {
                    sqlx::query(statement).execute(&mut *self.conn).await?;
                }
                info!("✅ [{step}] categories and locations ready");
                Ok(step.next())
            }
            MigrationStep::Backfill => {
                self.backfill().await?;

                let shape = SchemaShape::inspect(self.conn).await?;
                if shape.is_normalized() {
                    info!("✅ [{step}] {PRODUCTS} already normalized, skipping table swap");
                    if shape.has_shadow {
                        warn!("⚠️ Dropping stale {SHADOW}");
                        sqlx::query(&format!("DROP TABLE {SHADOW}"))
                            .execute(&mut *self.conn)
                            .await?;
                    }
                    Ok(MigrationStep::Complete)
                } else {
                    Ok(step.next())
                }
            }
            other => Ok(other.next()),
        }
    }

    /// Step 1. A duplicate column is success; any other failure is fatal.
    async fn add_columns(&mut self) -> Result<(), MigrationError> {
        let shape = SchemaShape::inspect(self.conn).await?;

        for kind in LookupKind::ALL {
            let column = kind.id_column();
            if shape.has_column(column) {
                info!("⏭️ [add-columns] {column} already present");
                continue;
            }

            let sql = format!("ALTER TABLE {PRODUCTS} ADD COLUMN {column} INTEGER");
            match sqlx::query(&sql).execute(&mut *self.conn).await {
                Ok(_) => info!("✅ [add-columns] added {column}"),
                Err(err) if is_duplicate_column(&err) => {
                    info!("⏭️ [add-columns] {column} already present");
                }
                Err(source) => {
                    error!("❌ [add-columns] failed to add {column}: {source}");
                    return Err(MigrationError::AddColumn { column, source });
                }
            }
        }

        Ok(())
    }

    /// Steps 3 to 8 in one transaction.
    async fn backfill(&mut self) -> Result<(), MigrationError> {
        let shape = SchemaShape::inspect(self.conn).await?;
        let mut tx = self.conn.begin().await?;

        let result = backfill_in(&mut tx, &shape, &mut self.report).await;

        match result {
            Ok(()) => {
                tx.commit().await?;
                info!(
                    "✅ [backfill] {} product reference(s) set",
                    self.report.rows_backfilled
                );
                Ok(())
            }
            Err(err) => {
                error!("❌ [backfill] aborted before any destructive step: {err}");
                if let Err(rb) = tx.rollback().await {
                    error!("❌ [backfill] rollback failed: {rb}");
                }
                Err(err)
            }
        }
    }

    /// Steps 9 to 12 with foreign-key enforcement suspended, in one transaction.
    async fn swap(&mut self, from: MigrationStep) -> Result<MigrationStep, MigrationError> {
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *self.conn)
            .await?;

        let result = self.swap_in_tx(from).await;

        let restored = sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *self.conn)
            .await;

        result?;
        restored?;

        self.report.swapped = true;
        Ok(MigrationStep::Complete)
    }

    async fn swap_in_tx(&mut self, from: MigrationStep) -> Result<(), MigrationError> {
        let mut tx = self.conn.begin().await?;
        let mut step = from;
        let mut executed = Vec::new();

        while step.is_swap() {
            match swap_step(&mut tx, step).await {
                Ok(rows) => {
                    if step == MigrationStep::CopyRows {
                        self.report.rows_copied = rows;
                    }
                    info!("✅ [{step}] done");
                    executed.push(step);
                    step = step.next();
                }
                Err(err) => {
                    error!("❌ [{step}] failed: {err}");
                    if let Err(rb) = tx.rollback().await {
                        error!("❌ [{step}] rollback failed: {rb}");
                    }
                    return Err(err);
                }
            }
        }

        let violations =
            sqlx::query_scalar::<_, String>("SELECT \"table\" FROM pragma_foreign_key_check(?)")
                .bind(PRODUCTS)
                .fetch_all(&mut *tx)
                .await?;

        if !violations.is_empty() {
            let msg = format!(
                "{} foreign key violation(s) in {PRODUCTS} after swap",
                violations.len()
            );
            error!("❌ {msg}");
            if let Err(rb) = tx.rollback().await {
                error!("❌ swap rollback failed: {rb}");
            }
            return Err(MigrationError::ShadowSwap(msg));
        }

        tx.commit().await?;
        self.report.steps.extend(executed);
        Ok(())
    }
}

async fn backfill_in(
    conn: &mut SqliteConnection,
    shape: &SchemaShape,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let mut defaults = Vec::with_capacity(LookupKind::ALL.len());

    for kind in LookupKind::ALL {
        let table = kind.table();
        let harvested = if shape.has_legacy(kind) {
            let column = kind.legacy_column();
            let values = sqlx::query_scalar::<_, String>(&format!(
                "SELECT DISTINCT {column} FROM {PRODUCTS} \
                 WHERE {column} IS NOT NULL AND {column} != ''"
            ))
            .fetch_all(&mut *conn)
            .await?;

            for value in &values {
                sqlx::query(&format!("INSERT OR IGNORE INTO {table} (name) VALUES (?)"))
                    .bind(value)
                    .execute(&mut *conn)
                    .await?;
            }

            info!("✅ [backfill] harvested {} {kind} value(s)", values.len());
            values.len()
        } else {
            info!("⏭️ [backfill] no legacy {kind} column, default only");
            0
        };

        sqlx::query(&format!("INSERT OR IGNORE INTO {table} (name) VALUES (?)"))
            .bind(kind.default_name())
            .execute(&mut *conn)
            .await?;

        let default_id =
            sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {table} WHERE name = ?"))
                .bind(kind.default_name())
                .fetch_optional(&mut *conn)
                .await?
                .ok_or(MigrationError::DefaultLookupMissing {
                    table,
                    name: kind.default_name(),
                })?;

        match kind {
            LookupKind::Category => {
                report.harvested_categories = harvested;
                report.default_category_id = Some(default_id);
            }
            LookupKind::Location => {
                report.harvested_locations = harvested;
                report.default_location_id = Some(default_id);
            }
        }

        defaults.push((kind, default_id));
    }

    for (kind, default_id) in defaults {
        let table = kind.table();
        let id_column = kind.id_column();

        if shape.has_legacy(kind) {
            let column = kind.legacy_column();
            let linked = sqlx::query(&format!(
                "UPDATE {PRODUCTS} \
                 SET {id_column} = (SELECT id FROM {table} WHERE {table}.name = {PRODUCTS}.{column}) \
                 WHERE {column} IS NOT NULL AND {column} != ''"
            ))
            .execute(&mut *conn)
            .await?;
            report.rows_backfilled += linked.rows_affected();
        }

        let defaulted = sqlx::query(&format!(
            "UPDATE {PRODUCTS} SET {id_column} = ? WHERE {id_column} IS NULL"
        ))
        .bind(default_id)
        .execute(&mut *conn)
        .await?;
        report.rows_backfilled += defaulted.rows_affected();
    }

    Ok(())
}

async fn swap_step(conn: &mut SqliteConnection, step: MigrationStep) -> Result<u64, MigrationError> {
    let result: SqliteQueryResult = match step {
        MigrationStep::CreateShadow => {
            sqlx::query(&format!("DROP TABLE IF EXISTS {SHADOW}"))
                .execute(&mut *conn)
                .await?;
            sqlx::query(&schema::create_products_sql(SHADOW))
                .execute(&mut *conn)
                .await?
        }
        MigrationStep::CopyRows => {
            sqlx::query(&format!(
                "INSERT INTO {SHADOW} (id, name, category_id, quantity, location_id) \
                 SELECT id, name, category_id, quantity, location_id FROM {PRODUCTS}"
            ))
            .execute(&mut *conn)
            .await?
        }
        MigrationStep::DropOriginal => {
            sqlx::query(&format!("DROP TABLE {PRODUCTS}"))
                .execute(&mut *conn)
                .await?
        }
        MigrationStep::RenameShadow => {
            sqlx::query(&format!("ALTER TABLE {SHADOW} RENAME TO {PRODUCTS}"))
                .execute(&mut *conn)
                .await?
        }
        other => {
            return Err(MigrationError::ShadowSwap(format!(
                "{other} is not a swap step"
            )));
        }
    };

    Ok(result.rows_affected())
}

fn is_duplicate_column(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.message().contains("duplicate column name"))
}

/// Opens its own connection to `database_url`, migrates, and closes the
/// connection whether or not the run succeeded. The database file must
/// already exist.
pub async fn migrate_database(database_url: &str) -> Result<MigrationReport, MigrationError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(false)
        .foreign_keys(true);

    let mut conn = SqliteConnection::connect_with(&options).await?;
    info!("🗄️ Migration connected to {database_url}");

    let result = Migrator::new(&mut conn).run().await;

    match conn.close().await {
        Ok(()) => info!("🔌 Migration connection closed"),
        Err(err) => error!("❌ Failed to close migration connection: {err}"),
    }

    result
}
