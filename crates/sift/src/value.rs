//! Runtime value types for field reads and writes.
//!
//! The [`Value`] enum is what an [`Accessor`](crate::Accessor) returns when a
//! field is read, what a filter compares against, and what an update writes.
//! [`Document`] is the key-style record shape built from it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A string-keyed record.
///
/// Documents deserialize straight from JSON objects:
///
/// ```
/// use sift::{Document, Value};
///
/// let doc: Document = serde_json::from_str(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(doc["age"], Value::from(30));
/// ```
pub type Document = BTreeMap<String, Value>;

/// Dynamic field value.
///
/// `List` is the only non-scalar variant: filters search it by membership
/// instead of comparing it by equality. Numbers compare by numeric value
/// across variants, so `Value::from(1)` equals `Value::from(1.0)` and both
/// land in the same group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent or null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Ordered collection of values.
    List(Vec<Value>),
    /// Nested document.
    Map(Document),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for every variant except `List`.
    pub fn is_scalar(&self) -> bool {
        !self.is_list()
    }

    /// Returns `true` if this is a `List`.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list items, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the nested document, if present.
    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` if this is a list holding `candidate` as one of its items.
    pub fn contains(&self, candidate: &Value) -> bool {
        self.as_list()
            .is_some_and(|items| items.iter().any(|item| item == candidate))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparison is exact across variants. An integer equals a float only when
/// the float holds that very integer, even beyond the 2^53 range where `f64`
/// stops representing every integer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::I64(a), Number::U64(b)) => Some((a as i128).cmp(&(b as i128))),
            (Number::U64(a), Number::I64(b)) => Some((a as i128).cmp(&(b as i128))),
            (Number::I64(a), Number::F64(b)) => int_cmp_float(a as i128, b),
            (Number::U64(a), Number::F64(b)) => int_cmp_float(a as i128, b),
            (Number::F64(a), Number::I64(b)) => int_cmp_float(b as i128, a).map(Ordering::reverse),
            (Number::F64(a), Number::U64(b)) => int_cmp_float(b as i128, a).map(Ordering::reverse),
        }
    }

    /// The exact integer this number holds, if any.
    fn as_wide(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(n as i128),
            Number::U64(n) => Some(n as i128),
            Number::F64(n) if n.fract() == 0.0 && n.abs() < 2f64.powi(127) => Some(n as i128),
            Number::F64(_) => None,
        }
    }

    fn from_wide(n: i128) -> Number {
        if let Ok(n) = i64::try_from(n) {
            Number::I64(n)
        } else if let Ok(n) = u64::try_from(n) {
            Number::U64(n)
        } else {
            Number::F64(n as f64)
        }
    }
}

// Float to int casts saturate, so huge and infinite floats land on the right side.
fn int_cmp_float(a: i128, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i128)) {
        Ordering::Equal => whole.partial_cmp(&b),
        unequal => Some(unequal),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

// NaN is the one value not equal to itself; it simply never finds its group.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal numbers hold the same integer, or are the same non-integral float.
        match self.as_wide() {
            Some(n) => n.hash(state),
            None => self.to_f64().to_bits().hash(state),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

/// Integer sums stay integral while they fit in 64 bits; anything else
/// falls back to floating point.
impl Add for Number {
    type Output = Number;

    fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Number::from_wide(a as i128 + b as i128),
            (Number::U64(a), Number::U64(b)) => Number::from_wide(a as i128 + b as i128),
            (Number::I64(a), Number::U64(b)) | (Number::U64(b), Number::I64(a)) => {
                Number::from_wide(a as i128 + b as i128)
            }
            _ => Number::F64(self.to_f64() + other.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($variant:ident, $wide:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }

            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

impl_from_primitive!(I64, i64, i8, i16, i32, i64, isize);
impl_from_primitive!(U64, u64, u8, u16, u32, u64, usize);
impl_from_primitive!(F64, f64, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Document> for Value {
    fn from(map: Document) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(Number::I64(n)) => n.into(),
            Value::Number(Number::U64(n)) => n.into(),
            Value::Number(Number::F64(n)) => serde_json::Number::from_f64(n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

// Typed extraction, for `Attributes::set_attribute` implementations.
// The error hands the original value back.

impl TryFrom<Value> for String {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Number(Number::I64(n)) => Ok(n),
            Value::Number(Number::U64(n)) => i64::try_from(n).map_err(|_| value),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for u64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Number(Number::U64(n)) => Ok(n),
            Value::Number(Number::I64(n)) => u64::try_from(n).map_err(|_| value),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Number(n) => Ok(n.to_f64()),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        let all_strings = value
            .as_list()
            .is_some_and(|items| items.iter().all(|item| item.as_str().is_some()));
        if !all_strings {
            return Err(value);
        }
        match value {
            Value::List(items) => Ok(items
                .into_iter()
                .filter_map(|item| String::try_from(item).ok())
                .collect()),
            other => Err(other),
        }
    }
}
