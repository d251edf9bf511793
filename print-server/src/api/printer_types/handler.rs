//! Printer Type API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::PrinterTypeResponse;
use crate::db::repository::PrinterTypeRepository;
use crate::utils::AppResult;

/// GET /api/printer-types - 获取所有打印机类型
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PrinterTypeResponse>>> {
    let repo = PrinterTypeRepository::new(state.db.clone());
    let types = repo.find_all().await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}
