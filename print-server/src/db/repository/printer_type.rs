//! Printer Type Repository
//!
//! 只读：类型行由启动时的 schema 播种。

use super::{BaseRepository, RepoResult};
use crate::db::models::PrinterType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "printer_type";

#[derive(Clone)]
pub struct PrinterTypeRepository {
    base: BaseRepository,
}

impl PrinterTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all printer types
    pub async fn find_all(&self) -> RepoResult<Vec<PrinterType>> {
        let types: Vec<PrinterType> = self
            .base
            .db()
            .query("SELECT * FROM printer_type ORDER BY name")
            .await?
            .take(0)?;
        Ok(types)
    }

    /// Find printer type by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PrinterType>> {
        let printer_type: Option<PrinterType> = self.base.db().select((TABLE, id)).await?;
        Ok(printer_type)
    }
}
