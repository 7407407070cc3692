use time::Date;

use super::SqlValue;

/// The shape of a logical parameter's value.
///
/// The caller picks the shape when the value is supplied: a `Sequence`
/// expands to one placeholder per element, a `Scalar` to exactly one, and
/// an `Absent` value to none at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Absent,
    Scalar(SqlValue),
    Sequence(Vec<SqlValue>),
}

impl ParamValue {
    /// Builds a sequence from any iterator of convertible values.
    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SqlValue>,
    {
        ParamValue::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// The values this parameter binds, in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        match self {
            ParamValue::Absent => &[],
            ParamValue::Scalar(value) => std::slice::from_ref(value),
            ParamValue::Sequence(values) => values,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

impl From<SqlValue> for ParamValue {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => ParamValue::Absent,
            value => ParamValue::Scalar(value),
        }
    }
}

macro_rules! scalar_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.into())
                }
            }
        )+
    };
}

scalar_param!(&str, String, i32, i64, f64, bool, Date);

impl<T: Into<SqlValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => ParamValue::from(Into::<SqlValue>::into(v)),
            None => ParamValue::Absent,
        }
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::sequence(values)
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        ParamValue::sequence(values)
    }
}

impl<T: Into<SqlValue> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        ParamValue::sequence(values.iter().cloned())
    }
}

/// A named logical parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}
