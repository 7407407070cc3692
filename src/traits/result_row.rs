use crate::error::Result;
use crate::types::SqlValue;

/// Read access to one row of a result set.
/// Ordinals are 1-based and follow the result set's column order.
pub trait ResultRow {
    /// Returns the number of columns in the row.
    fn column_count(&self) -> usize;

    /// Returns the name of the column at `ordinal`.
    fn column_name(&self, ordinal: usize) -> Result<&str>;

    /// Returns the value of the column at `ordinal`.
    fn value(&self, ordinal: usize) -> Result<&SqlValue>;

    /// Returns the value of the column called `column`.
    fn value_by_name(&self, column: &str) -> Result<&SqlValue>;
}
