//! Printer API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{PrinterCreate, PrinterResponse, PrinterUpdate};
use crate::db::repository::PrinterRepository;
use crate::utils::validation::{self, MAX_EXTERNAL_ID_LEN, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};

/// POST /api/printers - 创建打印机
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PrinterCreate>,
) -> AppResult<(StatusCode, Json<PrinterResponse>)> {
    validation::validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validation::validate_optional_text(&payload.external_id, "externalId", MAX_EXTERNAL_ID_LEN)?;

    let repo = PrinterRepository::new(state.db.clone());
    let printer = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(printer.into())))
}

/// GET /api/printers - 获取所有打印机
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PrinterResponse>>> {
    let repo = PrinterRepository::new(state.db.clone());
    let printers = repo.find_all().await?;
    Ok(Json(printers.into_iter().map(Into::into).collect()))
}

/// GET /api/printers/:id - 获取单个打印机
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PrinterResponse>> {
    let repo = PrinterRepository::new(state.db.clone());
    let printer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Printer with ID {} not found", id)))?;
    Ok(Json(printer.into()))
}

/// PATCH /api/printers/:id - 更新打印机
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PrinterUpdate>,
) -> AppResult<Json<PrinterResponse>> {
    if let Some(ref name) = payload.name {
        validation::validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&payload.external_id, "externalId", MAX_EXTERNAL_ID_LEN)?;

    let repo = PrinterRepository::new(state.db.clone());
    let printer = repo.update(&id, payload).await?;
    Ok(Json(printer.into()))
}

/// DELETE /api/printers/:id - 删除打印机 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = PrinterRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
