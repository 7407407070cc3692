mod param;
mod row;
mod sql_value;

pub use param::{ParamValue, Parameter};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
