//! Print Job API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{PrintJobCreate, PrintJobResponse, PrintJobUpdate};
use crate::db::repository::{PrintJobRepository, PrintTimeFilter};
use crate::utils::AppResult;
use crate::utils::validation::{self, MAX_EXTERNAL_ID_LEN};

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    /// `"null"` 只返回未打印任务；省略返回全部；其它取值报错
    #[serde(rename = "printTime")]
    print_time: Option<String>,
}

/// POST /api/printers/:printerId/jobs - 提交打印任务
pub async fn create(
    State(state): State<ServerState>,
    Path(printer_id): Path<String>,
    Json(payload): Json<PrintJobCreate>,
) -> AppResult<(StatusCode, Json<PrintJobResponse>)> {
    validation::validate_optional_text(&payload.external_id, "externalId", MAX_EXTERNAL_ID_LEN)?;

    let repo = PrintJobRepository::new(state.db.clone());
    let (job, data) = repo.create_receipt_job(&printer_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PrintJobResponse::from_parts(job, data)),
    ))
}

/// GET /api/printers/:printerId/jobs - 任务列表 (新建在前)
pub async fn list(
    State(state): State<ServerState>,
    Path(printer_id): Path<String>,
    Query(query): Query<ListJobsQuery>,
) -> AppResult<Json<Vec<PrintJobResponse>>> {
    let filter = PrintTimeFilter::parse(query.print_time.as_deref())?;

    let repo = PrintJobRepository::new(state.db.clone());
    let jobs = repo.list_jobs(&printer_id, filter).await?;
    Ok(Json(
        jobs.into_iter()
            .map(|(job, data)| PrintJobResponse::from_parts(job, data))
            .collect(),
    ))
}

/// PATCH /api/printers/:printerId/jobs/:jobId - 更新取件/打印时间
pub async fn update(
    State(state): State<ServerState>,
    Path((printer_id, job_id)): Path<(String, String)>,
    Json(payload): Json<PrintJobUpdate>,
) -> AppResult<Json<PrintJobResponse>> {
    let repo = PrintJobRepository::new(state.db.clone());
    let (job, data) = repo.update_job(&printer_id, &job_id, payload).await?;
    Ok(Json(PrintJobResponse::from_parts(job, data)))
}
