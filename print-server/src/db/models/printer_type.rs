//! Printer Type Model
//!
//! 类型表在启动时播种，当前只有 `receipt` 对打印任务有意义。

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_helpers;

/// `printer_type:receipt` 的记录 key - 唯一支持打印任务的类型
pub const RECEIPT_PRINTER_TYPE: &str = "receipt";

/// Printer type model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// API 响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterTypeResponse {
    pub id: String,
    pub name: String,
    pub external_id: Option<String>,
}

impl From<PrinterType> for PrinterTypeResponse {
    fn from(printer_type: PrinterType) -> Self {
        Self {
            id: printer_type
                .id
                .as_ref()
                .map(serde_helpers::record_key)
                .unwrap_or_default(),
            name: printer_type.name,
            external_id: printer_type.external_id,
        }
    }
}
