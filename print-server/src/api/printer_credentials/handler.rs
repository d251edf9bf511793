//! Printer Credential API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{
    PrinterCredentialCreate, PrinterCredentialResponse, PrinterCredentialUpdate,
};
use crate::db::repository::PrinterCredentialRepository;
use crate::utils::validation::{self, MAX_EXTERNAL_ID_LEN, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};

/// POST /api/printers/:printerId/credentials - 签发凭证
pub async fn create(
    State(state): State<ServerState>,
    Path(printer_id): Path<String>,
    Json(payload): Json<PrinterCredentialCreate>,
) -> AppResult<(StatusCode, Json<PrinterCredentialResponse>)> {
    validation::validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validation::validate_optional_text(&payload.external_id, "externalId", MAX_EXTERNAL_ID_LEN)?;

    let repo = PrinterCredentialRepository::new(state.db.clone());
    let credential = repo.create(&printer_id, payload).await?;
    Ok((StatusCode::CREATED, Json(credential.into())))
}

/// GET /api/printers/:printerId/credentials - 获取打印机的所有凭证
pub async fn list(
    State(state): State<ServerState>,
    Path(printer_id): Path<String>,
) -> AppResult<Json<Vec<PrinterCredentialResponse>>> {
    let repo = PrinterCredentialRepository::new(state.db.clone());
    let credentials = repo.find_all_for_printer(&printer_id).await?;
    Ok(Json(credentials.into_iter().map(Into::into).collect()))
}

/// GET /api/printers/:printerId/credentials/:id - 获取单个凭证
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((printer_id, id)): Path<(String, String)>,
) -> AppResult<Json<PrinterCredentialResponse>> {
    let repo = PrinterCredentialRepository::new(state.db.clone());
    let credential = repo.find_by_id(&id, &printer_id).await?.ok_or_else(|| {
        AppError::not_found(format!("Printer credential with ID {} not found", id))
    })?;
    Ok(Json(credential.into()))
}

/// PATCH /api/printers/:printerId/credentials/:id - 更新凭证
pub async fn update(
    State(state): State<ServerState>,
    Path((printer_id, id)): Path<(String, String)>,
    Json(payload): Json<PrinterCredentialUpdate>,
) -> AppResult<Json<PrinterCredentialResponse>> {
    if let Some(ref name) = payload.name {
        validation::validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&payload.external_id, "externalId", MAX_EXTERNAL_ID_LEN)?;

    let repo = PrinterCredentialRepository::new(state.db.clone());
    let credential = repo.update(&id, &printer_id, payload).await?;
    Ok(Json(credential.into()))
}

/// DELETE /api/printers/:printerId/credentials/:id - 删除凭证 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path((printer_id, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let repo = PrinterCredentialRepository::new(state.db.clone());
    repo.delete(&id, &printer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
