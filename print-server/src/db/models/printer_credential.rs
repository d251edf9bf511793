//! Printer Credential Model
//!
//! 打印机级 bearer 凭证。token 由服务端生成，创建后不可修改；
//! 打印任务通过 `collection_printer_credential_id` 引用取件凭证。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_helpers;
use crate::utils::time::millis_to_datetime;

/// Printer credential model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub printer_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// 服务端生成的不透明 bearer token (base64url)
    pub token: String,
    pub creation_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterCredentialCreate {
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Patch payload - token 不可修改，省略的字段保持原值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PrinterCredentialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// API 响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterCredentialResponse {
    pub id: String,
    pub printer_id: String,
    pub name: String,
    pub external_id: Option<String>,
    pub token: String,
    pub creation_time: DateTime<Utc>,
    pub deletion_time: Option<DateTime<Utc>>,
}

impl From<PrinterCredential> for PrinterCredentialResponse {
    fn from(credential: PrinterCredential) -> Self {
        Self {
            id: credential
                .id
                .as_ref()
                .map(serde_helpers::record_key)
                .unwrap_or_default(),
            printer_id: credential.printer_id,
            name: credential.name,
            external_id: credential.external_id,
            token: credential.token,
            creation_time: millis_to_datetime(credential.creation_time),
            deletion_time: credential.deletion_time.map(millis_to_datetime),
        }
    }
}
