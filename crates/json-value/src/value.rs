use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::diff::{self, Mismatch};
use crate::literal::{ConstructionError, ToJsonValue};
use crate::number::Number;
use crate::parse::ParseError;
use crate::pointer::{self, PointerError};

/// An immutable JSON document.
///
/// Equality is structural. Array elements are compared in order, object
/// entries are compared by key regardless of insertion order, and numbers
/// are compared by numeric value. Values of different kinds are never equal,
/// so `{}` is not `[]` and `0` is not `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(BTreeMap<String, JsonValue>),
}

/// The tag of a [`JsonValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

impl JsonValue {
    /// Parse raw JSON text.
    ///
    /// The whole input must be a single JSON document; trailing characters
    /// other than whitespace are an error. When an object repeats a key the
    /// last occurrence wins.
    ///
    /// ```
    /// use jsonkit_value::JsonValue;
    ///
    /// let v = JsonValue::from_text(r#"{"a": [1, 2.0]}"#).unwrap();
    /// assert_eq!(v, JsonValue::from_text(r#"{"a": [1.0, 2]}"#).unwrap());
    /// assert!(JsonValue::from_text("{").is_err());
    /// ```
    pub fn from_text(raw: &str) -> Result<JsonValue, ParseError> {
        serde_json::from_str(raw).map_err(|err| ParseError::new(raw, &err))
    }

    /// Build a value from a native literal, converting every nested element.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use jsonkit_value::{AnyJson, JsonValue};
    ///
    /// let list = JsonValue::from_literal(&["one", "two"]).unwrap();
    /// assert_eq!(list, JsonValue::from_text(r#"["one","two"]"#).unwrap());
    ///
    /// let mixed = BTreeMap::from([("string", AnyJson::from("a")), ("int", AnyJson::from(3))]);
    /// let obj = JsonValue::from_literal(&mixed).unwrap();
    /// assert_eq!(obj, JsonValue::from_text(r#"{"int":3,"string":"a"}"#).unwrap());
    /// ```
    pub fn from_literal<T: ToJsonValue + ?Sized>(value: &T) -> Result<JsonValue, ConstructionError> {
        value.to_json_value()
    }

    /// An empty object.
    pub fn object() -> JsonValue {
        JsonValue::Object(BTreeMap::new())
    }

    /// An empty array.
    pub fn array() -> JsonValue {
        JsonValue::Array(Vec::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Bool,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an object member. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Resolve an RFC 6901 JSON Pointer such as `/items/0/name`.
    ///
    /// Malformed pointers and missing locations both give `None`.
    pub fn pointer(&self, text: &str) -> Option<&JsonValue> {
        self.try_pointer(text).ok().flatten()
    }

    /// Like [`pointer`](Self::pointer), but reports a malformed pointer.
    pub fn try_pointer(&self, text: &str) -> Result<Option<&JsonValue>, PointerError> {
        let segments = pointer::split(text)?;
        Ok(segments.iter().try_fold(self, |node, segment| match node {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => array_index(segment).and_then(|i| items.get(i)),
            _ => None,
        }))
    }

    /// Explain the first structural difference between `self` (expected) and
    /// `actual`, or `None` when they are equal.
    pub fn diff(&self, actual: &JsonValue) -> Option<Mismatch> {
        diff::first_mismatch(self, actual)
    }

    /// Multi-line indented rendering.
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

// Array indices are plain decimal without sign or leading zeros.
fn array_index(segment: &str) -> Option<usize> {
    let digits = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    if !digits || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    segment.parse().ok()
}

/// Compact JSON text.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for JsonValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonValue::from_text(s)
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> Self {
        JsonValue::Number(n)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(num) => {
                if let Some(u) = num.as_u64() {
                    JsonValue::Number(Number::from(u))
                } else if let Some(i) = num.as_i64() {
                    JsonValue::Number(Number::from(i))
                } else {
                    // serde_json never holds non-finite floats.
                    num.as_f64()
                        .and_then(Number::from_f64)
                        .map_or(JsonValue::Null, JsonValue::Number)
                }
            }
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_serde_json_value() {
        let v = JsonValue::from(json!({"a": [1, -2, 2.5, "x", null, true]}));
        let items = v.get("a").and_then(JsonValue::as_array).expect("array");
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].as_number().and_then(Number::as_u64), Some(1));
        assert_eq!(items[1].as_number().and_then(Number::as_i64), Some(-2));
        assert_eq!(items[2].as_number().map(Number::as_f64), Some(2.5));
        assert_eq!(items[3].as_str(), Some("x"));
        assert!(items[4].is_null());
        assert_eq!(items[5].as_bool(), Some(true));
    }

    #[test]
    fn kinds() {
        assert_eq!(JsonValue::Null.kind(), ValueKind::Null);
        assert_eq!(JsonValue::object().kind(), ValueKind::Object);
        assert_eq!(JsonValue::array().kind(), ValueKind::Array);
        assert_eq!(ValueKind::Bool.to_string(), "boolean");
    }

    #[test]
    fn display_is_compact_json() {
        let v = JsonValue::from(json!({"b": [1, 2.0], "a": "x\"y"}));
        assert_eq!(v.to_string(), r#"{"a":"x\"y","b":[1,2.0]}"#);
        assert_eq!(JsonValue::object().to_string(), "{}");
        assert_eq!(JsonValue::array().to_string(), "[]");
    }

    #[test]
    fn pretty_rendering_is_indented() {
        let v = JsonValue::from(json!({"a": [1]}));
        assert_eq!(v.to_pretty(), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn pointer_lookup() {
        let v = JsonValue::from(json!({"a/b": [{"c": 1}], "~": 2}));
        assert_eq!(v.pointer(""), Some(&v));
        assert_eq!(
            v.pointer("/a~1b/0/c"),
            Some(&JsonValue::Number(Number::from(1u64)))
        );
        assert_eq!(v.pointer("/~0"), Some(&JsonValue::Number(Number::from(2u64))));
        assert_eq!(v.pointer("/a~1b/1"), None);
        assert_eq!(v.pointer("/a~1b/x"), None);
        assert_eq!(v.pointer("/a~1b/00/c"), None);
        assert_eq!(v.pointer("/a~1b/+0/c"), None);
        assert_eq!(v.pointer("relative"), None);
        assert!(matches!(v.try_pointer("/a~2"), Err(PointerError::BadEscape(_))));
        assert_eq!(v.try_pointer("/missing"), Ok(None));
    }

    #[test]
    fn parses_via_from_str() {
        let v: JsonValue = "[true]".parse().expect("valid");
        assert_eq!(v, JsonValue::Array(vec![JsonValue::Bool(true)]));
        assert!("[true".parse::<JsonValue>().is_err());
    }
}
