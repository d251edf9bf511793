//! Print Job API 模块
//!
//! 小票打印任务：提交、列表 (可按未打印过滤)、时间戳更新。
//! 任务不可删除，生命周期只通过两个时间戳推进。

mod handler;

use axum::{Router, middleware, routing::get, routing::patch};

use crate::auth::{MANAGE_PRINTERS, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/printers/{printer_id}/jobs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{job_id}", patch(handler::update))
        .layer(middleware::from_fn(require_permission(MANAGE_PRINTERS)))
}
