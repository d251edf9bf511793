//! Printer Repository
//!
//! 软删除语义：delete 只写 `deletion_time`，所有读取过滤已删除记录。

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Printer, PrinterCreate, PrinterUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "printer";

#[derive(Serialize)]
struct SoftDelete {
    deletion_time: i64,
}

#[derive(Clone)]
pub struct PrinterRepository {
    base: BaseRepository,
}

impl PrinterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all printers that are not soft-deleted, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Printer>> {
        let printers: Vec<Printer> = self
            .base
            .db()
            .query(
                "SELECT * FROM printer WHERE deletion_time IS NONE ORDER BY creation_time DESC",
            )
            .await?
            .take(0)?;
        Ok(printers)
    }

    /// Find printer by id, excluding soft-deleted records
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Printer>> {
        let printers: Vec<Printer> = self
            .base
            .db()
            .query("SELECT * FROM type::thing($tb, $id) WHERE deletion_time IS NONE")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(printers.into_iter().next())
    }

    /// Create a new printer
    pub async fn create(&self, data: PrinterCreate) -> RepoResult<Printer> {
        // 引用的类型必须存在 (嵌入式存储无外键约束)
        self.ensure_printer_type(&data.printer_type_id).await?;

        let printer = Printer {
            id: None,
            printer_type_id: data.printer_type_id,
            name: data.name,
            external_id: data.external_id,
            creation_time: now_millis(),
            deletion_time: None,
        };

        let id = Uuid::new_v4().to_string();
        let created: Option<Printer> = self.base.db().create((TABLE, id)).content(printer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create printer".to_string()))
    }

    /// Update a printer
    pub async fn update(&self, id: &str, data: PrinterUpdate) -> RepoResult<Printer> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Printer with ID {} not found", id)))?;

        if let Some(ref printer_type_id) = data.printer_type_id {
            self.ensure_printer_type(printer_type_id).await?;
        }

        let updated: Option<Printer> = self.base.db().update((TABLE, id)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Printer with ID {} not found", id)))
    }

    /// Soft delete a printer
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Printer with ID {} not found", id)))?;

        let result: Option<Printer> = self
            .base
            .db()
            .update((TABLE, id))
            .merge(SoftDelete {
                deletion_time: now_millis(),
            })
            .await?;
        Ok(result.is_some())
    }

    async fn ensure_printer_type(&self, printer_type_id: &str) -> RepoResult<()> {
        let type_repo = super::PrinterTypeRepository::new(self.base.db().clone());
        if type_repo.find_by_id(printer_type_id).await?.is_none() {
            return Err(RepoError::Validation(format!(
                "Printer type {} does not exist",
                printer_type_id
            )));
        }
        Ok(())
    }
}
