use std::collections::HashMap;
use std::sync::Arc;

use crate::mapping::PropertyLookup;
use crate::types::SqlValue;

/// An algorithm that matches a result column to a property on the target.
///
/// Strategies are pure: the answer depends only on the column name, the
/// coerced value and the target's properties.
pub trait MappingStrategy: Send + Sync {
    /// Short name shown in mapping errors.
    fn name(&self) -> &str;

    /// Returns the property `column` should be written to, if this strategy finds one.
    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String>;
}

/// The column name is the property name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactName;

impl MappingStrategy for ExactName {
    fn name(&self) -> &str {
        "ExactName"
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        target
            .accepts(column, value)
            .then(|| column.to_string())
    }
}

/// The column name equals the property name, ignoring ASCII case.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCase;

impl MappingStrategy for IgnoreCase {
    fn name(&self) -> &str {
        "IgnoreCase"
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        target
            .property_names()
            .into_iter()
            .find(|p| p.eq_ignore_ascii_case(column) && target.accepts(p, value))
            .map(str::to_string)
    }
}

/// `user_name` matches the property `userName`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCase;

impl MappingStrategy for CamelCase {
    fn name(&self) -> &str {
        "CamelCase"
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        let property = to_camel_case(column);
        target.accepts(&property, value).then_some(property)
    }
}

/// Column and property match once underscores are dropped and case is folded,
/// so `USER_NAME`, `UserName` and `user_name` all meet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalized;

impl MappingStrategy for Normalized {
    fn name(&self) -> &str {
        "Normalized"
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        let wanted = normalize(column);
        target
            .property_names()
            .into_iter()
            .find(|p| normalize(p) == wanted && target.accepts(p, value))
            .map(str::to_string)
    }
}

/// An explicit column to property table, for names no convention can bridge.
#[derive(Debug, Clone, Default)]
pub struct ColumnAlias {
    aliases: HashMap<String, String>,
}

impl ColumnAlias {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, column: impl Into<String>, property: impl Into<String>) -> Self {
        self.aliases.insert(column.into(), property.into());
        self
    }
}

impl MappingStrategy for ColumnAlias {
    fn name(&self) -> &str {
        "ColumnAlias"
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        self.aliases
            .get(column)
            .filter(|property| target.accepts(property, value))
            .cloned()
    }
}

/// A strategy backed by a closure.
pub struct FnStrategy<F> {
    name: String,
    f: F,
}

impl<F> MappingStrategy for FnStrategy<F>
where
    F: Fn(&str, &SqlValue, &dyn PropertyLookup) -> Option<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn find_match(
        &self,
        column: &str,
        value: &SqlValue,
        target: &dyn PropertyLookup,
    ) -> Option<String> {
        (self.f)(column, value, target)
    }
}

/// Wrap a closure as a named [`MappingStrategy`].
pub fn strategy_fn<F>(name: impl Into<String>, f: F) -> FnStrategy<F>
where
    F: Fn(&str, &SqlValue, &dyn PropertyLookup) -> Option<String> + Send + Sync,
{
    FnStrategy {
        name: name.into(),
        f,
    }
}

/// The chain every [`RowProcessor`](crate::RowProcessor) starts with.
pub fn default_strategies() -> Vec<Arc<dyn MappingStrategy>> {
    vec![
        Arc::new(ExactName),
        Arc::new(IgnoreCase),
        Arc::new(CamelCase),
        Arc::new(Normalized),
    ]
}

fn to_camel_case(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    for (i, part) in column.split('_').filter(|p| !p.is_empty()).enumerate() {
        let lower = part.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
