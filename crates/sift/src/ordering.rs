//! Value ordering for sorting and extremum lookups.
//!
//! Provides [`compare_values`] and [`SortKey`] for single-field and
//! multi-field ordering.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::error::{Result, SiftError};
use crate::value::Value;

/// The field, or tuple of fields, a sort is keyed on.
///
/// A tuple compares lexicographically: the first field decides, the next
/// one breaks ties, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by one field.
    Field(String),
    /// Sort by a tuple of fields.
    Fields(Vec<String>),
}

impl SortKey {
    /// The fields making up this key, most significant first.
    pub fn fields(&self) -> &[String] {
        match self {
            SortKey::Field(field) => std::slice::from_ref(field),
            SortKey::Fields(fields) => fields,
        }
    }
}

impl From<&str> for SortKey {
    fn from(field: &str) -> Self {
        SortKey::Field(field.to_string())
    }
}

impl From<String> for SortKey {
    fn from(field: String) -> Self {
        SortKey::Field(field)
    }
}

impl From<Vec<&str>> for SortKey {
    fn from(fields: Vec<&str>) -> Self {
        SortKey::Fields(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for SortKey {
    fn from(fields: Vec<String>) -> Self {
        SortKey::Fields(fields)
    }
}

impl<const N: usize> From<[&str; N]> for SortKey {
    fn from(fields: [&str; N]) -> Self {
        SortKey::Fields(fields.into_iter().map(str::to_string).collect())
    }
}

/// Compares two values of the same type.
///
/// Returns `None` if the types don't match or comparison is not possible (NaN).
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => compare_lists(a, b),

        // Null values sort last
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Greater),
        (_, Value::Null) => Some(Ordering::Less),

        // Type mismatch (and maps) - cannot compare
        _ => None,
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match compare_values(x, y)? {
            Ordering::Equal => continue,
            unequal => return Some(unequal),
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Total order over all values that agrees with [`compare_values`] wherever
/// that returns `Some`.
///
/// Sorting falls back to it for incomparable pairs so the sort itself stays
/// well-defined while the failure is reported.
pub(crate) fn total_cmp(a: &Value, b: &Value) -> Ordering {
    if let Some(ordering) = compare_values(a, b) {
        return ordering;
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.to_f64().total_cmp(&y.to_f64()),
        (Value::List(x), Value::List(y)) => x
            .iter()
            .zip(y)
            .map(|(p, q)| total_cmp(p, q))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Map(x), Value::Map(y)) => x
            .iter()
            .zip(y)
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| total_cmp(va, vb)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::List(_) => 3,
        Value::Map(_) => 4,
        Value::Null => 5,
    }
}

pub(crate) fn total_cmp_rows(a: &[Cow<'_, Value>], b: &[Cow<'_, Value>]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| total_cmp(x, y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compares two rows of key values field by field.
///
/// `a` and `b` hold one value per entry of `fields`. Fails with
/// [`SiftError::Unorderable`] on the first pair that cannot be ordered.
pub(crate) fn compare_rows(
    a: &[Cow<'_, Value>],
    b: &[Cow<'_, Value>],
    fields: &[String],
) -> Result<Ordering> {
    for ((x, y), field) in a.iter().zip(b).zip(fields) {
        match compare_values(x, y) {
            Some(Ordering::Equal) => continue,
            Some(unequal) => return Ok(unequal),
            None => return Err(SiftError::unorderable(field, x, y)),
        }
    }
    Ok(Ordering::Equal)
}

/// Rearranges `records` so that position `k` holds the element that was at
/// `order[k]`.
///
/// `order` must be a permutation of `0..records.len()`.
pub(crate) fn permute<R>(records: &mut [R], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            records.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}
