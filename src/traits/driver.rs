use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Connecting to the database
/// - Converting SqlValue parameters to native types
/// - Executing statements and converting results to RawQueryResult
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Execute a SQL statement with the given positional parameters.
    /// `params[i]` binds the placeholder at physical index `i + 1`.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;
}
