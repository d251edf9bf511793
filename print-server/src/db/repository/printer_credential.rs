//! Printer Credential Repository
//!
//! 所有操作以 (credential id, printer id) 双键定位：
//! 凭证存在但归属其它打印机时同样按 NotFound 处理。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::rand::{SecureRandom, SystemRandom};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PrinterCredential, PrinterCredentialCreate, PrinterCredentialUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "printer_credential";

#[derive(Serialize)]
struct SoftDelete {
    deletion_time: i64,
}

#[derive(Clone)]
pub struct PrinterCredentialRepository {
    base: BaseRepository,
}

impl PrinterCredentialRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all credentials for a printer, newest first
    pub async fn find_all_for_printer(
        &self,
        printer_id: &str,
    ) -> RepoResult<Vec<PrinterCredential>> {
        let credentials: Vec<PrinterCredential> = self
            .base
            .db()
            .query(
                "SELECT * FROM printer_credential \
                 WHERE printer_id = $printer_id AND deletion_time IS NONE \
                 ORDER BY creation_time DESC",
            )
            .bind(("printer_id", printer_id.to_string()))
            .await?
            .take(0)?;
        Ok(credentials)
    }

    /// Find a credential by id, scoped to its printer
    pub async fn find_by_id(
        &self,
        id: &str,
        printer_id: &str,
    ) -> RepoResult<Option<PrinterCredential>> {
        let credentials: Vec<PrinterCredential> = self
            .base
            .db()
            .query(
                "SELECT * FROM type::thing($tb, $id) \
                 WHERE printer_id = $printer_id AND deletion_time IS NONE",
            )
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .bind(("printer_id", printer_id.to_string()))
            .await?
            .take(0)?;
        Ok(credentials.into_iter().next())
    }

    /// Create a credential with a freshly issued bearer token
    pub async fn create(
        &self,
        printer_id: &str,
        data: PrinterCredentialCreate,
    ) -> RepoResult<PrinterCredential> {
        let credential = PrinterCredential {
            id: None,
            printer_id: printer_id.to_string(),
            name: data.name,
            external_id: data.external_id,
            token: generate_secure_token()?,
            creation_time: now_millis(),
            deletion_time: None,
        };

        let id = Uuid::new_v4().to_string();
        let created: Option<PrinterCredential> =
            self.base.db().create((TABLE, id)).content(credential).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create printer credential".to_string()))
    }

    /// Update a credential (name / external id only)
    pub async fn update(
        &self,
        id: &str,
        printer_id: &str,
        data: PrinterCredentialUpdate,
    ) -> RepoResult<PrinterCredential> {
        self.find_by_id(id, printer_id).await?.ok_or_else(|| {
            RepoError::NotFound(format!("Printer credential with ID {} not found", id))
        })?;

        let updated: Option<PrinterCredential> =
            self.base.db().update((TABLE, id)).merge(data).await?;
        updated.ok_or_else(|| {
            RepoError::NotFound(format!("Printer credential with ID {} not found", id))
        })
    }

    /// Soft delete a credential
    pub async fn delete(&self, id: &str, printer_id: &str) -> RepoResult<bool> {
        self.find_by_id(id, printer_id).await?.ok_or_else(|| {
            RepoError::NotFound(format!("Printer credential with ID {} not found", id))
        })?;

        let result: Option<PrinterCredential> = self
            .base
            .db()
            .update((TABLE, id))
            .merge(SoftDelete {
                deletion_time: now_millis(),
            })
            .await?;
        Ok(result.is_some())
    }
}

/// Generate an opaque bearer token
///
/// 32 bytes of CSPRNG output, base64url without padding (~43 chars).
fn generate_secure_token() -> RepoResult<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes)
        .map_err(|_| RepoError::Database("Failed to generate credential token".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
