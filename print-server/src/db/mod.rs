//! Database Module
//!
//! Handles the embedded SurrealDB instance, schema definition and seed rows

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("spool")
            .use_db("spool")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB embedded, RocksDB)");

        Ok(Self { db })
    }
}

/// Define tables, indexes and seed rows
///
/// Statements are idempotent (`IF NOT EXISTS` / `UPSERT`) so startup can run
/// them unconditionally; the embedded store has no separate migration step.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS printer_type SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS printer SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx__printer__printer_type_id ON printer FIELDS printer_type_id;
        DEFINE TABLE IF NOT EXISTS printer_credential SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx__printer_credential__printer_id ON printer_credential FIELDS printer_id;
        DEFINE TABLE IF NOT EXISTS print_job_type SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS print_job SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx__print_job__printer_id ON print_job FIELDS printer_id;
        DEFINE TABLE IF NOT EXISTS receipt_print_job SCHEMALESS;
        UPSERT printer_type:receipt SET name = 'Receipt';
        UPSERT print_job_type:receipt SET name = 'Receipt';
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    tracing::info!("Database schema applied");
    Ok(())
}
