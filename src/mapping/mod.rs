mod column_types;
mod processor;
mod strategy;
mod target;

pub use column_types::{ColumnType, ColumnTypes};
pub use processor::{RowProcessor, UnmatchedColumn};
pub use strategy::{
    default_strategies, strategy_fn, CamelCase, ColumnAlias, ExactName, FnStrategy, IgnoreCase,
    MappingStrategy, Normalized,
};
pub use target::{FromRow, FromSqlValue, PropertyLookup, TargetType};
