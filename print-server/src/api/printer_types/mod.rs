//! Printer Type API 模块
//!
//! 只读：创建打印机前查询可用类型。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{MANAGE_PRINTERS, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/printer-types", get(handler::list))
        .layer(middleware::from_fn(require_permission(MANAGE_PRINTERS)))
}
