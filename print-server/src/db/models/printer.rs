//! Printer Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_helpers;
use crate::utils::time::millis_to_datetime;

pub type PrinterId = Thing;

/// Printer model
///
/// `deletion_time` 非空表示软删除；读取接口一律过滤软删除记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Printer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrinterId>,
    pub printer_type_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub creation_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterCreate {
    pub printer_type_id: String,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Patch payload - 省略的字段保持原值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PrinterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// API 响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterResponse {
    pub id: String,
    pub printer_type_id: String,
    pub name: String,
    pub external_id: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub deletion_time: Option<DateTime<Utc>>,
}

impl From<Printer> for PrinterResponse {
    fn from(printer: Printer) -> Self {
        Self {
            id: printer
                .id
                .as_ref()
                .map(serde_helpers::record_key)
                .unwrap_or_default(),
            printer_type_id: printer.printer_type_id,
            name: printer.name,
            external_id: printer.external_id,
            creation_time: millis_to_datetime(printer.creation_time),
            deletion_time: printer.deletion_time.map(millis_to_datetime),
        }
    }
}
