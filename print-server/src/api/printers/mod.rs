//! Printer API 模块
//!
//! 打印机目录 CRUD，删除为软删除。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{MANAGE_PRINTERS, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/printers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // 路由参数名与凭证/任务子路由保持一致，matchit 不允许同位异名
        .route(
            "/{printer_id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission(MANAGE_PRINTERS)))
}
