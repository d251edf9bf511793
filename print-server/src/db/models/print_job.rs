//! Print Job Model
//!
//! 任务归属唯一一台打印机；小票任务另有一条 1:1 的
//! [`ReceiptPrintJob`] 卫星记录，保存提交时校验过的文档树。
//!
//! 两个可空时间戳构成隐式状态机 (见 [`JobState`])，两者相互独立、
//! 可重设亦可清空，服务端不做先后顺序约束。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_helpers;
use crate::utils::time::millis_to_datetime;

/// `print_job_type:receipt` 的记录 key
pub const RECEIPT_JOB_TYPE: &str = "receipt";

pub type PrintJobId = Thing;

/// Print job model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrintJobId>,
    pub printer_id: String,
    pub print_job_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// 取件该任务的凭证，由取件代理回填
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_printer_credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_time: Option<i64>,
    pub creation_time: i64,
}

/// 任务状态 - 由两个可空时间戳推导
///
/// 字段本身是唯一事实来源；枚举只为下游消费者
/// (取件/打印代理) 提供穷举匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// 已创建，未取件未打印
    Created,
    /// 已取件，未打印
    Collected,
    /// 已打印，未取件
    Printed,
    /// 已取件且已打印
    CollectedAndPrinted,
}

impl PrintJob {
    /// 当前状态
    pub fn state(&self) -> JobState {
        match (self.collection_time, self.print_time) {
            (None, None) => JobState::Created,
            (Some(_), None) => JobState::Collected,
            (None, Some(_)) => JobState::Printed,
            (Some(_), Some(_)) => JobState::CollectedAndPrinted,
        }
    }
}

/// 小票任务卫星记录 - 与任务同 key，创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptPrintJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    /// 校验通过的文档树，按提交原样保存
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobCreate {
    #[serde(default)]
    pub external_id: Option<String>,
    /// 文档树：单个节点或节点数组
    pub data: serde_json::Value,
}

/// Patch payload
///
/// 双层 Option 区分「未提供」(保持原值) 与「显式 null」(清空)。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobUpdate {
    #[serde(default, deserialize_with = "serde_helpers::double_option")]
    pub collection_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "serde_helpers::double_option")]
    pub print_time: Option<Option<DateTime<Utc>>>,
}

impl PrintJobUpdate {
    /// 是否为空补丁 (不产生任何写入)
    pub fn is_empty(&self) -> bool {
        self.collection_time.is_none() && self.print_time.is_none()
    }
}

/// API 响应 - 任务合并其文档载荷
///
/// `data` 仅在小票任务上出现，其它任务类型不携带该字段。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobResponse {
    pub id: String,
    pub printer_id: String,
    pub print_job_type_id: String,
    pub external_id: Option<String>,
    pub collection_printer_credential_id: Option<String>,
    pub collection_time: Option<DateTime<Utc>>,
    pub print_time: Option<DateTime<Utc>>,
    pub creation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl PrintJobResponse {
    pub fn from_parts(job: PrintJob, data: Option<serde_json::Value>) -> Self {
        Self {
            id: job
                .id
                .as_ref()
                .map(serde_helpers::record_key)
                .unwrap_or_default(),
            printer_id: job.printer_id,
            print_job_type_id: job.print_job_type_id,
            external_id: job.external_id,
            collection_printer_credential_id: job.collection_printer_credential_id,
            collection_time: job.collection_time.map(millis_to_datetime),
            print_time: job.print_time.map(millis_to_datetime),
            creation_time: millis_to_datetime(job.creation_time),
            data,
        }
    }
}
