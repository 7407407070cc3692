use thiserror::Error;

/// Error type for sqlrs operations
#[derive(Debug, Error)]
pub enum SqlRsError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Parameter :{0} is referenced in the statement but was never bound")]
    UnboundParameter(String),

    #[error("Could not construct an instance of {target}: {reason}")]
    Construction { target: String, reason: String },

    #[error(
        "Could not map [column: {column}, type: {value_type}, value: {value}] to a property on {target} \
         using strategies: [{strategies}]. Likely there is no property that takes the expected type."
    )]
    NoMatchingProperty {
        column: String,
        value_type: &'static str,
        value: String,
        target: String,
        strategies: String,
    },

    #[error(
        "Property {property} on {target} rejected [column: {column}, type: {value_type}, value: {value}]"
    )]
    PropertyType {
        column: String,
        property: String,
        value_type: &'static str,
        value: String,
        target: String,
    },

    #[error("Cannot coerce column {column} value {value} ({value_type}) to {declared}")]
    Coercion {
        column: String,
        declared: &'static str,
        value_type: &'static str,
        value: String,
    },
}

/// Result type alias for sqlrs operations
pub type Result<T> = std::result::Result<T, SqlRsError>;
