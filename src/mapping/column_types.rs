use std::collections::HashMap;
use std::fmt;

use time::{macros::format_description, Date};

use crate::error::{Result, SqlRsError};
use crate::types::SqlValue;

/// The semantic type a column's raw value is coerced to before mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Use the value exactly as the driver produced it.
    #[default]
    Object,
    Text,
    Int32,
    Int64,
    Float64,
    Bool,
    Date,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Object => "object",
            ColumnType::Text => "text",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
        }
    }

    /// Coerce `value`, read from `column`, to this type. NULL stays NULL.
    pub fn coerce(&self, column: &str, value: &SqlValue) -> Result<SqlValue> {
        if value.is_null() {
            return Ok(SqlValue::Null);
        }

        let coerced = match (self, value) {
            (ColumnType::Object, v) => Some(v.clone()),

            (ColumnType::Text, SqlValue::Text(v)) => Some(SqlValue::Text(v.clone())),
            (ColumnType::Text, v) => Some(SqlValue::Text(v.to_string())),

            (ColumnType::Int32, SqlValue::Int32(v)) => Some(SqlValue::Int32(*v)),
            (ColumnType::Int32, SqlValue::Int64(v)) => i32::try_from(*v).ok().map(SqlValue::Int32),
            (ColumnType::Int32, SqlValue::Bool(v)) => Some(SqlValue::Int32(i32::from(*v))),
            (ColumnType::Int32, SqlValue::Text(v)) => v.trim().parse().ok().map(SqlValue::Int32),

            (ColumnType::Int64, SqlValue::Int32(v)) => Some(SqlValue::Int64(i64::from(*v))),
            (ColumnType::Int64, SqlValue::Int64(v)) => Some(SqlValue::Int64(*v)),
            (ColumnType::Int64, SqlValue::Bool(v)) => Some(SqlValue::Int64(i64::from(*v))),
            (ColumnType::Int64, SqlValue::Text(v)) => v.trim().parse().ok().map(SqlValue::Int64),

            (ColumnType::Float64, SqlValue::Int32(v)) => Some(SqlValue::Float64(f64::from(*v))),
            (ColumnType::Float64, SqlValue::Int64(v)) => Some(SqlValue::Float64(*v as f64)),
            (ColumnType::Float64, SqlValue::Float64(v)) => Some(SqlValue::Float64(*v)),
            (ColumnType::Float64, SqlValue::Text(v)) => {
                v.trim().parse().ok().map(SqlValue::Float64)
            }

            (ColumnType::Bool, SqlValue::Bool(v)) => Some(SqlValue::Bool(*v)),
            (ColumnType::Bool, SqlValue::Int32(v)) => int_to_bool(i64::from(*v)),
            (ColumnType::Bool, SqlValue::Int64(v)) => int_to_bool(*v),
            (ColumnType::Bool, SqlValue::Text(v)) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Some(SqlValue::Bool(true)),
                "false" | "f" | "0" => Some(SqlValue::Bool(false)),
                _ => None,
            },

            (ColumnType::Date, SqlValue::Date(v)) => Some(SqlValue::Date(*v)),
            (ColumnType::Date, SqlValue::Text(v)) => {
                Date::parse(v.trim(), format_description!("[year]-[month]-[day]"))
                    .ok()
                    .map(SqlValue::Date)
            }

            _ => None,
        };

        coerced.ok_or_else(|| SqlRsError::Coercion {
            column: column.to_string(),
            declared: self.name(),
            value_type: value.type_name(),
            value: value.to_string(),
        })
    }
}

fn int_to_bool(v: i64) -> Option<SqlValue> {
    match v {
        0 => Some(SqlValue::Bool(false)),
        1 => Some(SqlValue::Bool(true)),
        _ => None,
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared column types, keyed by column name.
/// Columns without a declaration resolve to [`ColumnType::Object`].
#[derive(Debug, Clone, Default)]
pub struct ColumnTypes {
    types: HashMap<String, ColumnType>,
}

impl ColumnTypes {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declare the type of `column`, replacing any earlier declaration.
    pub fn with(mut self, column: impl Into<String>, column_type: ColumnType) -> Self {
        self.types.insert(column.into(), column_type);
        self
    }

    pub fn get(&self, column: &str) -> ColumnType {
        self.types.get(column).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ColumnType)> for ColumnTypes {
    fn from_iter<I: IntoIterator<Item = (K, ColumnType)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |types, (column, ty)| types.with(column, ty))
    }
}
