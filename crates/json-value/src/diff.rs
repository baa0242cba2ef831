//! First-difference search between two JSON trees, for failure messages.

use std::collections::BTreeSet;
use std::fmt;

use crate::pointer;
use crate::value::JsonValue;

/// Longest compact rendering shown inline before a container is summarised.
const INLINE_LIMIT: usize = 60;

/// Where and how an actual value departs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    path: Vec<String>,
    kind: MismatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Different JSON types at the same location.
    Type {
        expected: JsonValue,
        actual: JsonValue,
    },
    /// Same scalar type, different value.
    Value {
        expected: JsonValue,
        actual: JsonValue,
    },
    /// Arrays agree on their common prefix but differ in length.
    Length { expected: usize, actual: usize },
    MissingKey(String),
    UnexpectedKey(String),
}

impl Mismatch {
    /// Unescaped path segments from the root to the divergence.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path as a JSON Pointer; `""` is the root.
    pub fn pointer(&self) -> String {
        pointer::join(&self.path)
    }

    pub fn kind(&self) -> &MismatchKind {
        &self.kind
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str("at root: ")?;
        } else {
            write!(f, "at {}: ", self.pointer())?;
        }
        match &self.kind {
            MismatchKind::Type { expected, actual } => {
                write!(f, "expected {}, got {}", typed(expected), typed(actual))
            }
            MismatchKind::Value { expected, actual } => {
                write!(f, "expected {}, got {}", summary(expected), summary(actual))
            }
            MismatchKind::Length { expected, actual } => {
                write!(f, "expected {expected} elements, got {actual}")
            }
            MismatchKind::MissingKey(key) => write!(f, "missing key {key:?}"),
            MismatchKind::UnexpectedKey(key) => write!(f, "unexpected key {key:?}"),
        }
    }
}

fn typed(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        _ => format!("{} {}", value.kind(), summary(value)),
    }
}

fn summary(value: &JsonValue) -> String {
    let text = value.to_string();
    if text.chars().count() <= INLINE_LIMIT {
        return text;
    }
    match value {
        JsonValue::Array(items) => format!("[… {} elements]", items.len()),
        JsonValue::Object(entries) => format!("{{… {} keys}}", entries.len()),
        _ => {
            let head: String = text.chars().take(INLINE_LIMIT).collect();
            format!("{head}…")
        }
    }
}

pub(crate) fn first_mismatch(expected: &JsonValue, actual: &JsonValue) -> Option<Mismatch> {
    let mut path = Vec::new();
    let kind = walk(expected, actual, &mut path)?;
    Some(Mismatch { path, kind })
}

// On a mismatch `path` is left pointing at it; otherwise it is restored.
fn walk(expected: &JsonValue, actual: &JsonValue, path: &mut Vec<String>) -> Option<MismatchKind> {
    match (expected, actual) {
        (JsonValue::Array(exp), JsonValue::Array(act)) => {
            for (i, (e, a)) in exp.iter().zip(act).enumerate() {
                path.push(i.to_string());
                if let Some(kind) = walk(e, a, path) {
                    return Some(kind);
                }
                path.pop();
            }
            (exp.len() != act.len()).then(|| MismatchKind::Length {
                expected: exp.len(),
                actual: act.len(),
            })
        }
        (JsonValue::Object(exp), JsonValue::Object(act)) => {
            let keys: BTreeSet<&String> = exp.keys().chain(act.keys()).collect();
            for key in keys {
                match (exp.get(key), act.get(key)) {
                    (Some(e), Some(a)) => {
                        path.push(key.clone());
                        if let Some(kind) = walk(e, a, path) {
                            return Some(kind);
                        }
                        path.pop();
                    }
                    (Some(_), None) => return Some(MismatchKind::MissingKey(key.clone())),
                    (None, Some(_)) => return Some(MismatchKind::UnexpectedKey(key.clone())),
                    (None, None) => {}
                }
            }
            None
        }
        _ if expected.kind() != actual.kind() => Some(MismatchKind::Type {
            expected: expected.clone(),
            actual: actual.clone(),
        }),
        _ => (expected != actual).then(|| MismatchKind::Value {
            expected: expected.clone(),
            actual: actual.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> JsonValue {
        JsonValue::from_text(text).unwrap()
    }

    #[test]
    fn equal_trees_have_no_mismatch() {
        assert_eq!(parse(r#"{"a":[1,{"b":null}]}"#).diff(&parse(r#"{"a":[1.0,{"b":null}]}"#)), None);
    }

    #[test]
    fn type_mismatch_at_root() {
        let m = parse("{}").diff(&parse("[]")).unwrap();
        assert_eq!(m.pointer(), "");
        assert_eq!(m.to_string(), "at root: expected object {}, got array []");
    }

    #[test]
    fn value_mismatch_in_object_member() {
        let m = parse(r#"{"int":3,"string":"a"}"#)
            .diff(&parse(r#"{"string":"b","int":4}"#))
            .unwrap();
        // Keys are visited in sorted order.
        assert_eq!(m.path(), ["int".to_string()]);
        assert_eq!(m.to_string(), "at /int: expected 3, got 4");
    }

    #[test]
    fn element_mismatch_wins_over_length() {
        let m = parse(r#"["one","two","three"]"#)
            .diff(&parse(r#"["two","one"]"#))
            .unwrap();
        assert_eq!(m.to_string(), r#"at /0: expected "one", got "two""#);
    }

    #[test]
    fn length_mismatch_after_common_prefix() {
        let m = parse("[1,2,3]").diff(&parse("[1,2]")).unwrap();
        assert_eq!(
            m.kind(),
            &MismatchKind::Length {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(m.to_string(), "at root: expected 3 elements, got 2");
    }

    #[test]
    fn missing_and_unexpected_keys() {
        let m = parse(r#"{"a":1,"b":2}"#).diff(&parse(r#"{"b":2}"#)).unwrap();
        assert_eq!(m.kind(), &MismatchKind::MissingKey("a".into()));
        assert_eq!(m.to_string(), r#"at root: missing key "a""#);

        let m = parse(r#"{"b":2}"#).diff(&parse(r#"{"a":1,"b":2}"#)).unwrap();
        assert_eq!(m.kind(), &MismatchKind::UnexpectedKey("a".into()));
    }

    #[test]
    fn nested_path_is_escaped() {
        let m = parse(r#"{"a/b":[{"~":true}]}"#)
            .diff(&parse(r#"{"a/b":[{"~":"true"}]}"#))
            .unwrap();
        assert_eq!(m.pointer(), "/a~1b/0/~0");
        assert_eq!(m.path(), ["a/b".to_string(), "0".to_string(), "~".to_string()]);
        assert_eq!(
            m.to_string(),
            r#"at /a~1b/0/~0: expected boolean true, got string "true""#
        );
    }

    #[test]
    fn large_containers_are_summarised() {
        let long: Vec<u32> = (0..100).collect();
        let expected = JsonValue::from_literal(&long).unwrap();
        let m = expected.diff(&JsonValue::Null).unwrap();
        assert_eq!(
            m.to_string(),
            "at root: expected array [… 100 elements], got null"
        );
    }
}
