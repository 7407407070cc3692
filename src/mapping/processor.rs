use std::sync::Arc;

use crate::error::{Result, SqlRsError};
use crate::mapping::{default_strategies, ColumnTypes, FromRow, MappingStrategy, TargetType};
use crate::traits::ResultRow;

/// What to do with a column that no strategy could match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedColumn {
    /// Fail the whole row with [`SqlRsError::NoMatchingProperty`].
    #[default]
    Error,
    /// Skip the column and log the same message at debug level.
    Ignore,
}

/// Builds one `T` per row by running every column through the strategy chain.
///
/// The processor holds no per-row state, so one instance can map any number
/// of rows, and it can be shared between threads when `T` allows it.
pub struct RowProcessor<T> {
    target: TargetType<T>,
    column_types: ColumnTypes,
    strategies: Vec<Arc<dyn MappingStrategy>>,
    unmatched: UnmatchedColumn,
}

impl<T: FromRow> RowProcessor<T> {
    /// A processor for a type that describes itself.
    pub fn for_type() -> Self {
        Self::new(T::target_type())
    }
}

impl<T: 'static> RowProcessor<T> {
    pub fn new(target: TargetType<T>) -> Self {
        Self {
            target,
            column_types: ColumnTypes::empty(),
            strategies: default_strategies(),
            unmatched: UnmatchedColumn::default(),
        }
    }

    /// Declare column types used to coerce raw values before matching.
    pub fn column_types(mut self, column_types: ColumnTypes) -> Self {
        self.column_types = column_types;
        self
    }

    /// Replace the strategy chain. Strategies are tried in order.
    pub fn strategies(mut self, strategies: Vec<Arc<dyn MappingStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Append a strategy to the end of the chain.
    pub fn strategy(mut self, strategy: impl MappingStrategy + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Set the policy for columns that match no property.
    pub fn unmatched_columns(mut self, policy: UnmatchedColumn) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn target(&self) -> &TargetType<T> {
        &self.target
    }

    /// Map one row. Columns are visited once each, left to right; the first
    /// strategy that names an accepting property wins.
    pub fn map<R: ResultRow + ?Sized>(&self, row: &R) -> Result<T> {
        let mut target = self.target.construct()?;

        for ordinal in 1..=row.column_count() {
            let column = row.column_name(ordinal)?;
            let declared = self.column_types.get(column);
            let value = declared.coerce(column, row.value(ordinal)?)?;

            let matched = self.strategies.iter().find_map(|strategy| {
                strategy
                    .find_match(column, &value, &self.target)
                    .filter(|property| self.target.has_property(property))
            });

            match matched {
                Some(property) => self.target.set(&mut target, &property, column, &value)?,
                None => {
                    let error = SqlRsError::NoMatchingProperty {
                        column: column.to_string(),
                        value_type: value.type_name(),
                        value: value.to_string(),
                        target: self.target.name().to_string(),
                        strategies: self.strategy_names(),
                    };
                    match self.unmatched {
                        UnmatchedColumn::Error => return Err(error),
                        UnmatchedColumn::Ignore => log::debug!("{error}"),
                    }
                }
            }
        }

        Ok(target)
    }

    /// Map every row, stopping at the first failure.
    pub fn map_all<'r, R, I>(&self, rows: I) -> Result<Vec<T>>
    where
        R: ResultRow + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        rows.into_iter().map(|row| self.map(row)).collect()
    }

    fn strategy_names(&self) -> String {
        self.strategies
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
