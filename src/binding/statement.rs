use std::collections::HashSet;

use super::resolver::IndexCursor;
use crate::binding::{Binding, PlaceholderStyle};
use crate::error::{Result, SqlRsError};
use crate::types::{ParamValue, Parameter, SqlValue};

/// SQL text with `:name` parameters and the values bound to them.
///
/// # Example
/// ```
/// use sqlrs::Statement;
///
/// let bound = Statement::new("SELECT * FROM users WHERE id IN (:ids) AND active = :active")
///     .bind("ids", vec![1, 2, 3])
///     .bind("active", true)
///     .build()
///     .unwrap();
///
/// assert_eq!(bound.sql(), "SELECT * FROM users WHERE id IN (?,?,?) AND active = ?");
/// assert_eq!(bound.params().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Statement {
    sql: String,
    params: Vec<Parameter>,
    style: PlaceholderStyle,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            style: PlaceholderStyle::default(),
        }
    }

    /// Set the placeholder spelling used when the statement is built.
    pub fn style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Bind a value to `:name`. Binding the same name again replaces the value.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let param = Parameter::new(name, value);
        match self.params.iter_mut().find(|p| p.name() == param.name()) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    /// Bind several named values at once.
    pub fn bind_all<I, N, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<ParamValue>,
    {
        values
            .into_iter()
            .fold(self, |statement, (name, value)| statement.bind(name, value))
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Expand every `:name` occurrence, in textual order, into its placeholders.
    ///
    /// Quoted literals, quoted identifiers, `::` casts and comments (`-- ...`
    /// to end of line, `/* ... */`) are copied untouched.
    pub fn build(&self) -> Result<BoundStatement> {
        let mut sql = String::with_capacity(self.sql.len() + 16);
        let mut values: Vec<SqlValue> = Vec::new();
        let mut bindings = Vec::new();
        let mut cursor = IndexCursor::new(1, self.style);
        let mut referenced = HashSet::new();

        let mut chars = self.sql.char_indices().peekable();
        let mut quote: Option<char> = None;

        while let Some((i, c)) = chars.next() {
            if let Some(open) = quote {
                sql.push(c);
                if c == open {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    sql.push(c);
                }
                '-' if matches!(chars.peek(), Some(&(_, '-'))) => {
                    sql.push(c);
                    for (_, n) in chars.by_ref() {
                        sql.push(n);
                        if n == '\n' {
                            break;
                        }
                    }
                }
                '/' if matches!(chars.peek(), Some(&(_, '*'))) => {
                    chars.next();
                    sql.push_str("/*");
                    let mut prev = None;
                    for (_, n) in chars.by_ref() {
                        sql.push(n);
                        if prev == Some('*') && n == '/' {
                            break;
                        }
                        prev = Some(n);
                    }
                }
                ':' => {
                    match chars.peek() {
                        Some(&(_, ':')) => {
                            chars.next();
                            sql.push_str("::");
                            continue;
                        }
                        Some(&(_, n)) if n.is_ascii_alphabetic() || n == '_' => {}
                        _ => {
                            sql.push(':');
                            continue;
                        }
                    }

                    let start = i + 1;
                    let mut end = start;
                    while let Some(&(j, n)) = chars.peek() {
                        if !(n.is_ascii_alphanumeric() || n == '_') {
                            break;
                        }
                        end = j + n.len_utf8();
                        chars.next();
                    }

                    let name = &self.sql[start..end];
                    let param = self
                        .params
                        .iter()
                        .find(|p| p.name() == name)
                        .ok_or_else(|| SqlRsError::UnboundParameter(name.to_string()))?;

                    let resolution = cursor.resolve(param.value());
                    sql.push_str(resolution.fragment());
                    values.extend(param.value().values().iter().cloned());
                    referenced.insert(name);
                    bindings.push(Binding {
                        name: name.to_string(),
                        resolution,
                    });
                }
                _ => sql.push(c),
            }
        }

        for param in &self.params {
            if !referenced.contains(param.name()) {
                log::debug!("parameter :{} is bound but never referenced", param.name());
            }
        }

        Ok(BoundStatement {
            sql,
            params: values,
            bindings,
        })
    }
}

/// A statement ready for execution: placeholder SQL plus positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    sql: String,
    params: Vec<SqlValue>,
    bindings: Vec<Binding>,
}

impl BoundStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values by physical index: `params()[i]` binds placeholder `i + 1`.
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// One entry per parameter occurrence, in textual order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// All physical indexes occupied by `name`, across every occurrence.
    pub fn indexes_of(&self, name: &str) -> Vec<usize> {
        self.bindings
            .iter()
            .filter(|b| b.name == name)
            .flat_map(|b| b.resolution.indexes())
            .collect()
    }
}
