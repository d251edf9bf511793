//! Print Job Repository
//!
//! 打印任务生命周期：提交 (含文档校验)、按打印机列表 (可过滤未打印)、
//! 时间戳补丁。任务与其小票文档卫星记录在同一事务内写入，
//! 不会出现有任务无文档的孤儿记录。

use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Printer, PrintJob, PrintJobCreate, PrintJobUpdate, RECEIPT_JOB_TYPE, RECEIPT_PRINTER_TYPE,
    ReceiptPrintJob, serde_helpers,
};
use crate::utils::time::now_millis;

const TABLE: &str = "print_job";
const RECEIPT_TABLE: &str = "receipt_print_job";

/// `printTime` 查询过滤器
///
/// 只有两个合法取值：缺省 (全部任务) 和字面量 `"null"` (未打印任务)。
/// 其它取值是客户端错误，不会被静默忽略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintTimeFilter {
    All,
    Unprinted,
}

impl PrintTimeFilter {
    pub fn parse(raw: Option<&str>) -> RepoResult<Self> {
        match raw {
            None => Ok(Self::All),
            Some("null") => Ok(Self::Unprinted),
            Some(other) => Err(RepoError::Validation(format!(
                "Invalid printTime filter: {other}. Use \"null\" or omit the parameter"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct PrintJobRepository {
    base: BaseRepository,
}

impl PrintJobRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a receipt print job for a printer
    ///
    /// 检查顺序是契约的一部分：打印机存在 → 类型支持任务 → 文档合法。
    /// 不存在的打印机永远报 NotFound，即便文档同样非法。
    pub async fn create_receipt_job(
        &self,
        printer_id: &str,
        data: PrintJobCreate,
    ) -> RepoResult<(PrintJob, Option<Value>)> {
        let printer = self.resolve_printer(printer_id).await?;

        // 目前只有小票打印机支持打印任务
        if printer.printer_type_id != RECEIPT_PRINTER_TYPE {
            return Err(RepoError::Unsupported(
                "Print jobs are only supported for receipt printers".to_string(),
            ));
        }

        spool_receipt::validate_document(&data.data)
            .map_err(|e| RepoError::Validation(format!("Invalid receipt data: {e}")))?;

        let job = PrintJob {
            id: None,
            printer_id: printer_id.to_string(),
            print_job_type_id: RECEIPT_JOB_TYPE.to_string(),
            external_id: data.external_id,
            collection_printer_credential_id: None,
            collection_time: None,
            print_time: None,
            creation_time: now_millis(),
        };
        let receipt = ReceiptPrintJob {
            id: None,
            data: data.data,
        };

        // 任务 + 卫星记录单事务写入
        let id = Uuid::new_v4().to_string();
        let mut result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::thing($job_tb, $id) CONTENT $job; \
                 CREATE type::thing($receipt_tb, $id) CONTENT $receipt; \
                 COMMIT TRANSACTION;",
            )
            .bind(("job_tb", TABLE))
            .bind(("receipt_tb", RECEIPT_TABLE))
            .bind(("id", id))
            .bind(("job", job))
            .bind(("receipt", receipt))
            .await?;

        let created: Vec<PrintJob> = result.take(0)?;
        let satellite: Vec<ReceiptPrintJob> = result.take(1)?;

        let job = created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create print job".to_string()))?;
        let data = satellite.into_iter().next().map(|r| r.data);
        Ok((job, data))
    }

    /// List jobs for a printer, newest first, merged with their documents
    pub async fn list_jobs(
        &self,
        printer_id: &str,
        filter: PrintTimeFilter,
    ) -> RepoResult<Vec<(PrintJob, Option<Value>)>> {
        self.resolve_printer(printer_id).await?;

        let sql = match filter {
            PrintTimeFilter::All => {
                "SELECT * FROM print_job WHERE printer_id = $printer_id \
                 ORDER BY creation_time DESC"
            }
            PrintTimeFilter::Unprinted => {
                "SELECT * FROM print_job WHERE printer_id = $printer_id \
                 AND print_time IS NONE ORDER BY creation_time DESC"
            }
        };

        let jobs: Vec<PrintJob> = self
            .base
            .db()
            .query(sql)
            .bind(("printer_id", printer_id.to_string()))
            .await?
            .take(0)?;

        let mut result = Vec::with_capacity(jobs.len());
        for job in jobs {
            let data = self.find_document(&job).await?;
            result.push((job, data));
        }
        Ok(result)
    }

    /// Patch collection/print timestamps of a job
    ///
    /// 只写补丁里出现的字段；显式 null 清空，缺省保持原值。
    /// 空补丁不产生写入，直接返回当前记录。
    pub async fn update_job(
        &self,
        printer_id: &str,
        job_id: &str,
        patch: PrintJobUpdate,
    ) -> RepoResult<(PrintJob, Option<Value>)> {
        self.resolve_printer(printer_id).await?;

        let job = self.find_job(printer_id, job_id).await?.ok_or_else(|| {
            RepoError::NotFound(format!(
                "Print job with ID {job_id} not found for printer {printer_id}"
            ))
        })?;

        if patch.is_empty() {
            let data = self.find_document(&job).await?;
            return Ok((job, data));
        }

        // 按补丁字段拼 SET 子句；清空用 NONE，未打印即「时间戳不存在」
        let mut sets = Vec::new();
        if let Some(collection_time) = &patch.collection_time {
            sets.push(match collection_time {
                Some(_) => "collection_time = $collection_time",
                None => "collection_time = NONE",
            });
        }
        if let Some(print_time) = &patch.print_time {
            sets.push(match print_time {
                Some(_) => "print_time = $print_time",
                None => "print_time = NONE",
            });
        }

        let sql = format!("UPDATE type::thing($tb, $id) SET {}", sets.join(", "));
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("tb", TABLE))
            .bind(("id", job_id.to_string()));
        if let Some(Some(collection_time)) = patch.collection_time {
            query = query.bind(("collection_time", collection_time.timestamp_millis()));
        }
        if let Some(Some(print_time)) = patch.print_time {
            query = query.bind(("print_time", print_time.timestamp_millis()));
        }

        let updated: Vec<PrintJob> = query.await?.take(0)?;
        let job = updated.into_iter().next().ok_or_else(|| {
            RepoError::NotFound(format!(
                "Print job with ID {job_id} not found for printer {printer_id}"
            ))
        })?;

        let data = self.find_document(&job).await?;
        Ok((job, data))
    }

    /// Resolve a printer or fail with NotFound
    async fn resolve_printer(&self, printer_id: &str) -> RepoResult<Printer> {
        let printers: Vec<Printer> = self
            .base
            .db()
            .query("SELECT * FROM type::thing('printer', $id) WHERE deletion_time IS NONE")
            .bind(("id", printer_id.to_string()))
            .await?
            .take(0)?;
        printers.into_iter().next().ok_or_else(|| {
            RepoError::NotFound(format!("Printer with ID {printer_id} not found"))
        })
    }

    /// Find a job scoped to its printer
    async fn find_job(&self, printer_id: &str, job_id: &str) -> RepoResult<Option<PrintJob>> {
        let jobs: Vec<PrintJob> = self
            .base
            .db()
            .query("SELECT * FROM type::thing($tb, $id) WHERE printer_id = $printer_id")
            .bind(("tb", TABLE))
            .bind(("id", job_id.to_string()))
            .bind(("printer_id", printer_id.to_string()))
            .await?
            .take(0)?;
        Ok(jobs.into_iter().next())
    }

    /// Fetch the document satellite for receipt jobs; other job types carry none
    async fn find_document(&self, job: &PrintJob) -> RepoResult<Option<Value>> {
        if job.print_job_type_id != RECEIPT_JOB_TYPE {
            return Ok(None);
        }
        let Some(thing) = &job.id else {
            return Ok(None);
        };
        let receipt: Option<ReceiptPrintJob> = self
            .base
            .db()
            .select((RECEIPT_TABLE, serde_helpers::record_key(thing)))
            .await?;
        Ok(receipt.map(|r| r.data))
    }
}
