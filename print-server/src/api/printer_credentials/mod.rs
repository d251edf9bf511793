//! Printer Credential API 模块
//!
//! 打印机级 bearer 凭证，按打印机路径作用域访问。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{MANAGE_PRINTERS, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/printers/{printer_id}/credentials", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission(MANAGE_PRINTERS)))
}
