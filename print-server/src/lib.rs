//! Spool Print Server - 打印机与小票打印任务管理服务
//!
//! # 架构概述
//!
//! 本模块是 Print Server 的主入口，提供以下核心功能：
//!
//! - **打印机目录** (`api/printers`): 打印机 CRUD (软删除)
//! - **凭证管理** (`api/printer_credentials`): 打印机级 bearer 凭证签发
//! - **打印任务** (`api/print_jobs`): 小票任务提交、列表、时间戳更新
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT bearer 认证与权限检查
//!
//! # 模块结构
//!
//! ```text
//! print-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____                  __
  / ___/____  ____  ____  / /
  \__ \/ __ \/ __ \/ __ \/ /
 ___/ / /_/ / /_/ / /_/ / /
/____/ .___/\____/\____/_/
    /_/
    "#
    );
}
