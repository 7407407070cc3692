//! sqlrs - placeholder expansion and row mapping for hand-written SQL
//!
//! Binding: named parameters expand to as many placeholders as their value
//! needs, and each one records the physical indexes it occupies.
//! Mapping: every result column is matched to a property on the target type
//! through an ordered chain of strategies.
//!
//! # Example
//! ```ignore
//! use sqlrs::{RowProcessor, SqlRsClient, Statement};
//!
//! let client = SqlRsClient::connect("postgres://localhost/mydb").await?;
//! let querier = client.querier();
//!
//! let users: Vec<User> = querier
//!     .list(
//!         Statement::new("SELECT user_name, user_age FROM users WHERE id IN (:ids)")
//!             .bind("ids", vec![1, 2, 3]),
//!         &RowProcessor::<User>::for_type(),
//!     )
//!     .await?;
//! ```

pub mod binding;
pub mod drivers;
pub mod error;
pub mod mapping;
pub mod querier;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use binding::{resolve, resolve_all, BoundStatement, PlaceholderStyle, Resolution, Statement};
pub use client::SqlRsClient;
pub use error::{Result, SqlRsError};
pub use mapping::{
    ColumnType, ColumnTypes, FromRow, MappingStrategy, RowProcessor, TargetType, UnmatchedColumn,
};
pub use querier::Querier;
pub use traits::{DatabaseDriver, ResultRow};
pub use types::{ParamValue, Parameter, QueryResult, RawQueryResult, Row, SqlValue};
