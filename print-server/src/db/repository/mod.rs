//! Repository Module
//!
//! Provides storage operations for the SurrealDB tables.

// Printer Domain
pub mod printer;
pub mod printer_credential;
pub mod printer_type;

// Print Jobs
pub mod print_job;

// Re-exports
pub use printer::PrinterRepository;
pub use printer_credential::PrinterCredentialRepository;
pub use printer_type::PrinterTypeRepository;
pub use print_job::{PrintJobRepository, PrintTimeFilter};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// 请求的操作对该记录的类型不支持 (区别于 NotFound/Validation)
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
