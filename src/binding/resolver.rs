use std::ops::Range;

use crate::binding::PlaceholderStyle;
use crate::types::{ParamValue, Parameter, SqlValue};

/// The outcome of resolving one logical parameter: the placeholder text to
/// splice into the statement and the physical indexes it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    fragment: String,
    indexes: Range<usize>,
}

impl Resolution {
    /// Placeholder text, e.g. `?,?,?`. Empty when the parameter contributes nothing.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Contiguous 1-based physical indexes, `start..end` (end exclusive).
    pub fn indexes(&self) -> Range<usize> {
        self.indexes.clone()
    }

    /// Number of placeholders emitted.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// The physical index the next parameter should start at.
    pub fn next_index(&self) -> usize {
        self.indexes.end
    }

    /// Pairs each physical index with the value bound there.
    pub fn bind_values<'a>(
        &self,
        value: &'a ParamValue,
    ) -> impl Iterator<Item = (usize, &'a SqlValue)> + 'a {
        self.indexes().zip(value.values())
    }
}

/// Resolves a parameter value whose first placeholder would sit at `next_index`.
///
/// Absent values and empty sequences emit no placeholder and record an empty
/// range at `next_index`. The function is pure: resolving the same value
/// twice returns two equal resolutions and records nothing anywhere else.
pub fn resolve(next_index: usize, value: &ParamValue, style: PlaceholderStyle) -> Resolution {
    let length = match value {
        ParamValue::Absent => 0,
        ParamValue::Scalar(_) => 1,
        ParamValue::Sequence(values) => {
            if values.is_empty() {
                log::warn!(
                    "empty sequence parameter at index {next_index} expands to no placeholders"
                );
            }
            values.len()
        }
    };

    let mut fragment = String::with_capacity(length * 2);
    style.write_placeholders(&mut fragment, next_index, length);

    Resolution {
        fragment,
        indexes: next_index..next_index + length,
    }
}

/// A resolved parameter, as recorded on a built statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub resolution: Resolution,
}

/// Running physical index shared by every caller that resolves parameters
/// in textual order. Each resolution starts where the previous one ended.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexCursor {
    next_index: usize,
    style: PlaceholderStyle,
}

impl IndexCursor {
    pub(crate) fn new(first_index: usize, style: PlaceholderStyle) -> Self {
        Self {
            next_index: first_index,
            style,
        }
    }

    pub(crate) fn resolve(&mut self, value: &ParamValue) -> Resolution {
        let resolution = resolve(self.next_index, value, self.style);
        self.next_index = resolution.next_index();
        resolution
    }
}

/// Resolves parameters in order, threading the running index so that each
/// parameter starts where the previous one ended.
///
/// The order of `params` must match the order in which the fragments are
/// concatenated into the statement text.
pub fn resolve_all(
    first_index: usize,
    params: &[Parameter],
    style: PlaceholderStyle,
) -> Vec<Binding> {
    let mut cursor = IndexCursor::new(first_index, style);
    params
        .iter()
        .map(|param| Binding {
            name: param.name().to_string(),
            resolution: cursor.resolve(param.value()),
        })
        .collect()
}
