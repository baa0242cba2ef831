//! Conversion from native Rust literals into [`JsonValue`].
//!
//! Only types with an obvious JSON mapping implement [`ToJsonValue`]; maps
//! must be keyed by strings. Anything else is rejected by the compiler. The
//! remaining run-time failures are numbers that JSON cannot hold.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

use thiserror::Error;

use crate::number::Number;
use crate::value::JsonValue;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstructionError {
    #[error("number {0} has no JSON representation")]
    NonFiniteNumber(f64),
    #[error("integer {0} does not fit in a 64-bit JSON number")]
    IntegerOutOfRange(String),
}

/// A native value that can be converted into a [`JsonValue`] tree.
///
/// Maps keyed by anything other than strings are rejected at compile time:
///
/// ```compile_fail
/// use std::collections::BTreeMap;
/// use jsonkit_value::JsonValue;
///
/// let _ = JsonValue::from_literal(&BTreeMap::from([(1, 2)]));
/// ```
///
/// So are leaves with no JSON mapping:
///
/// ```compile_fail
/// use jsonkit_value::JsonValue;
///
/// struct Opaque;
/// let _ = JsonValue::from_literal(&Opaque);
/// ```
///
/// The same map keyed by strings converts:
///
/// ```
/// use std::collections::BTreeMap;
/// use jsonkit_value::JsonValue;
///
/// let v = JsonValue::from_literal(&BTreeMap::from([("1", 2)])).unwrap();
/// assert_eq!(v, JsonValue::from_text(r#"{"1": 2}"#).unwrap());
/// ```
pub trait ToJsonValue {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError>;
}

impl ToJsonValue for JsonValue {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(self.clone())
    }
}

impl ToJsonValue for serde_json::Value {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(JsonValue::from(self.clone()))
    }
}

impl ToJsonValue for () {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(JsonValue::Null)
    }
}

impl ToJsonValue for bool {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(JsonValue::Bool(*self))
    }
}

macro_rules! int_to_json {
    ($($ty:ty),*) => {
        $(
            impl ToJsonValue for $ty {
                fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
                    Ok(JsonValue::Number(Number::from(*self)))
                }
            }
        )*
    };
}

int_to_json!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ToJsonValue for u128 {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        u64::try_from(*self)
            .map(|u| JsonValue::Number(Number::from(u)))
            .map_err(|_| ConstructionError::IntegerOutOfRange(self.to_string()))
    }
}

impl ToJsonValue for i128 {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        if let Ok(u) = u64::try_from(*self) {
            return Ok(JsonValue::Number(Number::from(u)));
        }
        i64::try_from(*self)
            .map(|i| JsonValue::Number(Number::from(i)))
            .map_err(|_| ConstructionError::IntegerOutOfRange(self.to_string()))
    }
}

impl ToJsonValue for f64 {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Number::from_f64(*self)
            .map(JsonValue::Number)
            .ok_or(ConstructionError::NonFiniteNumber(*self))
    }
}

impl ToJsonValue for f32 {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        f64::from(*self).to_json_value()
    }
}

impl ToJsonValue for str {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(JsonValue::String(self.to_owned()))
    }
}

impl ToJsonValue for String {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        self.as_str().to_json_value()
    }
}

impl ToJsonValue for char {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        Ok(JsonValue::String(self.to_string()))
    }
}

impl<T: ToJsonValue + ?Sized> ToJsonValue for &T {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        (**self).to_json_value()
    }
}

impl<T: ToJsonValue + ?Sized> ToJsonValue for Box<T> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        (**self).to_json_value()
    }
}

impl<T: ToJsonValue> ToJsonValue for Option<T> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        match self {
            Some(value) => value.to_json_value(),
            None => Ok(JsonValue::Null),
        }
    }
}

fn array_from<'a, T, I>(items: I) -> Result<JsonValue, ConstructionError>
where
    T: ToJsonValue + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(ToJsonValue::to_json_value)
        .collect::<Result<Vec<_>, _>>()
        .map(JsonValue::Array)
}

impl<T: ToJsonValue> ToJsonValue for [T] {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        array_from(self)
    }
}

impl<T: ToJsonValue, const N: usize> ToJsonValue for [T; N] {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        array_from(self)
    }
}

impl<T: ToJsonValue> ToJsonValue for Vec<T> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        array_from(self)
    }
}

impl<T: ToJsonValue> ToJsonValue for VecDeque<T> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        array_from(self)
    }
}

fn object_from<'a, K, V, I>(entries: I) -> Result<JsonValue, ConstructionError>
where
    K: AsRef<str> + 'a,
    V: ToJsonValue + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| v.to_json_value().map(|v| (k.as_ref().to_owned(), v)))
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(JsonValue::Object)
}

impl<K: AsRef<str>, V: ToJsonValue> ToJsonValue for BTreeMap<K, V> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        object_from(self)
    }
}

impl<K: AsRef<str>, V: ToJsonValue, S: BuildHasher> ToJsonValue for HashMap<K, V, S> {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        object_from(self)
    }
}

/// A leaf or container of any JSON-convertible type.
///
/// Lets a fixture mix value types inside one map or list:
///
/// ```
/// use std::collections::BTreeMap;
/// use jsonkit_value::{AnyJson, JsonValue};
///
/// let fixture = BTreeMap::from([
///     ("name", AnyJson::from("a")),
///     ("count", AnyJson::from(3)),
///     ("tags", AnyJson::from(vec!["x", "y"])),
/// ]);
/// let value = JsonValue::from_literal(&fixture).unwrap();
/// assert_eq!(value.pointer("/tags/1").and_then(JsonValue::as_str), Some("y"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AnyJson {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<AnyJson>),
    Object(BTreeMap<String, AnyJson>),
}

impl ToJsonValue for AnyJson {
    fn to_json_value(&self) -> Result<JsonValue, ConstructionError> {
        match self {
            AnyJson::Null => Ok(JsonValue::Null),
            AnyJson::Bool(b) => b.to_json_value(),
            AnyJson::Int(i) => i.to_json_value(),
            AnyJson::UInt(u) => u.to_json_value(),
            AnyJson::Float(f) => f.to_json_value(),
            AnyJson::String(s) => s.to_json_value(),
            AnyJson::Array(items) => items.to_json_value(),
            AnyJson::Object(entries) => entries.to_json_value(),
        }
    }
}

impl From<()> for AnyJson {
    fn from((): ()) -> Self {
        AnyJson::Null
    }
}

impl From<bool> for AnyJson {
    fn from(b: bool) -> Self {
        AnyJson::Bool(b)
    }
}

macro_rules! any_json_from {
    ($variant:ident($wide:ty) <= $($ty:ty),*) => {
        $(
            impl From<$ty> for AnyJson {
                fn from(v: $ty) -> Self {
                    AnyJson::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

any_json_from!(Int(i64) <= i8, i16, i32, i64);
any_json_from!(UInt(u64) <= u8, u16, u32, u64);
any_json_from!(Float(f64) <= f32, f64);

impl From<usize> for AnyJson {
    fn from(v: usize) -> Self {
        AnyJson::UInt(v as u64)
    }
}

impl From<isize> for AnyJson {
    fn from(v: isize) -> Self {
        AnyJson::Int(v as i64)
    }
}

impl From<&str> for AnyJson {
    fn from(s: &str) -> Self {
        AnyJson::String(s.to_owned())
    }
}

impl From<String> for AnyJson {
    fn from(s: String) -> Self {
        AnyJson::String(s)
    }
}

impl From<char> for AnyJson {
    fn from(c: char) -> Self {
        AnyJson::String(c.to_string())
    }
}

impl<T: Into<AnyJson>> From<Option<T>> for AnyJson {
    fn from(v: Option<T>) -> Self {
        v.map_or(AnyJson::Null, Into::into)
    }
}

impl<T: Into<AnyJson>> From<Vec<T>> for AnyJson {
    fn from(items: Vec<T>) -> Self {
        AnyJson::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<AnyJson>> From<BTreeMap<K, V>> for AnyJson {
    fn from(entries: BTreeMap<K, V>) -> Self {
        AnyJson::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
