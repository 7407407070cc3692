use std::error::Error;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio_postgres::{
    types::{to_sql_checked, IsNull, ToSql, Type},
    Client, NoTls,
};

use crate::error::{Result, SqlRsError};
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
/// Statements must use numbered placeholders (`$1`, `$2`, ...).
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| SqlRsError::ConnectionFailed(e.to_string()))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| SqlRsError::QueryFailed(e.to_string()))?;

        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(sql_value_to_tosql).collect();

        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(|e| SqlRsError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let result_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| row_value(row, i, col.type_()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawQueryResult::new(columns, result_rows))
    }
}

/// An untyped SQL NULL. The server-inferred parameter type decides the
/// column type, so NULL binds to integer, date and other columns alike.
#[derive(Debug, Clone, Copy)]
struct Null;

impl ToSql for Null {
    fn to_sql(
        &self,
        _ty: &Type,
        _out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        Ok(IsNull::Yes)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Convert a SqlValue to a boxed ToSql trait object.
fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(Null),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Float64(f) => Box::new(*f),
        SqlValue::Bool(b) => Box::new(*b),
        SqlValue::Date(d) => Box::new(*d),
    }
}

/// Read the value at `index` according to the column's PostgreSQL type.
///
/// Types without a `SqlValue` counterpart are read as text. Columns that
/// cannot be read as text either (e.g. `bytea`, `numeric`, `uuid`) fail the
/// query with `QueryFailed`; cast them to `text` in the SELECT list.
fn row_value(row: &tokio_postgres::Row, index: usize, type_: &Type) -> Result<SqlValue> {
    let value = match *type_ {
        Type::BOOL => row.try_get::<_, Option<bool>>(index).map(SqlValue::from),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map(|v| SqlValue::from(v.map(i32::from))),
        Type::INT4 => row.try_get::<_, Option<i32>>(index).map(SqlValue::from),
        Type::INT8 => row.try_get::<_, Option<i64>>(index).map(SqlValue::from),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map(|v| SqlValue::from(v.map(f64::from))),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(index).map(SqlValue::from),
        Type::DATE => row
            .try_get::<_, Option<time::Date>>(index)
            .map(SqlValue::from),
        _ => row.try_get::<_, Option<String>>(index).map(SqlValue::from),
    };

    value.map_err(|e| SqlRsError::QueryFailed(format!("column {index}: {e}")))
}
