use time::Date;

use crate::error::{Result, SqlRsError};
use crate::types::SqlValue;

/// Conversion from a (coerced) column value into a property's Rust type.
pub trait FromSqlValue: Sized {
    /// Whether a value of this kind is meant for a property of this type.
    /// Strategies only bind columns to properties that accept the value.
    fn accepts(value: &SqlValue) -> bool;

    /// Convert the value, or `None` if this particular value does not fit
    /// (out of range, NULL into a non-optional property).
    fn from_sql_value(value: &SqlValue) -> Option<Self>;
}

impl FromSqlValue for String {
    fn accepts(value: &SqlValue) -> bool {
        matches!(value, SqlValue::Text(_) | SqlValue::Null)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromSqlValue for i32 {
    fn accepts(value: &SqlValue) -> bool {
        matches!(value, SqlValue::Int32(_) | SqlValue::Int64(_) | SqlValue::Null)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Int32(v) => Some(*v),
            SqlValue::Int64(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FromSqlValue for i64 {
    fn accepts(value: &SqlValue) -> bool {
        matches!(value, SqlValue::Int32(_) | SqlValue::Int64(_) | SqlValue::Null)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Int32(v) => Some(i64::from(*v)),
            SqlValue::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromSqlValue for f64 {
    fn accepts(value: &SqlValue) -> bool {
        matches!(
            value,
            SqlValue::Float64(_) | SqlValue::Int32(_) | SqlValue::Int64(_) | SqlValue::Null
        )
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Float64(v) => Some(*v),
            SqlValue::Int32(v) => Some(f64::from(*v)),
            SqlValue::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl FromSqlValue for bool {
    fn accepts(value: &SqlValue) -> bool {
        matches!(value, SqlValue::Bool(_) | SqlValue::Null)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromSqlValue for Date {
    fn accepts(value: &SqlValue) -> bool {
        matches!(value, SqlValue::Date(_) | SqlValue::Null)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl<V: FromSqlValue> FromSqlValue for Option<V> {
    fn accepts(value: &SqlValue) -> bool {
        value.is_null() || V::accepts(value)
    }

    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Null => Some(None),
            v => V::from_sql_value(v).map(Some),
        }
    }
}

type Setter<T> = Box<dyn Fn(&mut T, &SqlValue) -> bool + Send + Sync>;
type Factory<T> = Box<dyn Fn() -> std::result::Result<T, String> + Send + Sync>;

struct Property<T> {
    name: String,
    accepts: fn(&SqlValue) -> bool,
    set: Setter<T>,
}

/// Describes how to build a `T` and which properties a row may populate.
///
/// Built once per [`RowProcessor`](crate::RowProcessor) and reused for every row.
///
/// # Example
/// ```
/// use sqlrs::TargetType;
///
/// #[derive(Default)]
/// struct User {
///     name: String,
///     age: i32,
/// }
///
/// let target = TargetType::<User>::new("User")
///     .property("name", |u: &mut User, v| u.name = v)
///     .property("age", |u: &mut User, v| u.age = v);
/// assert_eq!(target.name(), "User");
/// ```
pub struct TargetType<T> {
    name: String,
    factory: Factory<T>,
    properties: Vec<Property<T>>,
}

impl<T: Default + 'static> TargetType<T> {
    /// A target constructed with `T::default()`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_factory(name, || Ok(T::default()))
    }
}

impl<T: 'static> TargetType<T> {
    /// A target constructed by `factory`; a factory error aborts the mapping
    /// before any column is read.
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            properties: Vec::new(),
        }
    }

    /// Register a property and its typed setter.
    pub fn property<V, F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        V: FromSqlValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.properties.push(Property {
            name: name.into(),
            accepts: V::accepts,
            set: Box::new(move |target, value| match V::from_sql_value(value) {
                Some(v) => {
                    setter(target, v);
                    true
                }
                None => false,
            }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    pub(crate) fn construct(&self) -> Result<T> {
        (self.factory)().map_err(|reason| SqlRsError::Construction {
            target: self.name.clone(),
            reason,
        })
    }

    /// Write `value`, read from `column`, into `property` on `target`.
    pub(crate) fn set(
        &self,
        target: &mut T,
        property: &str,
        column: &str,
        value: &SqlValue,
    ) -> Result<()> {
        let written = self
            .properties
            .iter()
            .find(|p| p.name == property)
            .map(|p| (p.set)(target, value))
            .unwrap_or(false);

        if written {
            Ok(())
        } else {
            Err(SqlRsError::PropertyType {
                column: column.to_string(),
                property: property.to_string(),
                value_type: value.type_name(),
                value: value.to_string(),
                target: self.name.clone(),
            })
        }
    }
}

/// The read-only view of a target type that mapping strategies match against.
pub trait PropertyLookup {
    /// Name of the target type, for diagnostics.
    fn type_name(&self) -> &str;

    /// Property names in registration order.
    fn property_names(&self) -> Vec<&str>;

    /// Whether `property` exists and accepts a value of this kind.
    fn accepts(&self, property: &str, value: &SqlValue) -> bool;
}

impl<T: 'static> PropertyLookup for TargetType<T> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    fn accepts(&self, property: &str, value: &SqlValue) -> bool {
        self.properties
            .iter()
            .any(|p| p.name == property && (p.accepts)(value))
    }
}

/// Types that describe their own mapping target.
pub trait FromRow: Sized + 'static {
    fn target_type() -> TargetType<Self>;
}
