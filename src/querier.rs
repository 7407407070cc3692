use std::sync::Arc;

use crate::binding::{BoundStatement, PlaceholderStyle, Statement};
use crate::error::{Result, SqlRsError};
use crate::mapping::RowProcessor;
use crate::traits::{DatabaseDriver, ResultRow};
use crate::types::{QueryResult, SqlValue};

/// Executes statements and maps their rows.
/// Created from a SqlRsClient.
pub struct Querier {
    driver: Arc<dyn DatabaseDriver>,
    style: PlaceholderStyle,
}

impl Querier {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, style: PlaceholderStyle) -> Self {
        Self { driver, style }
    }

    /// Build `statement` with this querier's placeholder style.
    pub fn bind(&self, statement: Statement) -> Result<BoundStatement> {
        statement.style(self.style).build()
    }

    /// Execute the statement and return the raw result.
    pub async fn execute(&self, statement: Statement) -> Result<QueryResult> {
        let bound = self.bind(statement)?;
        let raw_result = self.driver.execute(bound.sql(), bound.params()).await?;
        Ok(QueryResult::from_raw(raw_result))
    }

    /// Execute the statement and map every row.
    pub async fn list<T: 'static>(
        &self,
        statement: Statement,
        processor: &RowProcessor<T>,
    ) -> Result<Vec<T>> {
        let result = self.execute(statement).await?;
        processor.map_all(result.rows_ref())
    }

    /// Execute the statement and map its only row.
    /// Fails unless exactly one row comes back.
    pub async fn single<T: 'static>(
        &self,
        statement: Statement,
        processor: &RowProcessor<T>,
    ) -> Result<T> {
        let row = self.execute(statement).await?.single_row()?;
        processor.map(&row)
    }

    /// Execute the statement and map at most one row.
    pub async fn optional<T: 'static>(
        &self,
        statement: Statement,
        processor: &RowProcessor<T>,
    ) -> Result<Option<T>> {
        self.execute(statement)
            .await?
            .optional_row()?
            .map(|row| processor.map(&row))
            .transpose()
    }

    /// Execute a counting statement and read the first column of its only row.
    pub async fn count(&self, statement: Statement) -> Result<i64> {
        let row = self.execute(statement).await?.single_row()?;
        match row.value(1)? {
            SqlValue::Int32(v) => Ok(i64::from(*v)),
            SqlValue::Int64(v) => Ok(*v),
            other => Err(SqlRsError::Coercion {
                column: row.column_name(1)?.to_string(),
                declared: "int64",
                value_type: other.type_name(),
                value: other.to_string(),
            }),
        }
    }
}
