//! Construction matrix: literals and raw text must build the same trees.

use std::collections::BTreeMap;

use jsonkit_value::{AnyJson, ConstructionError, JsonValue};

fn text(raw: &str) -> JsonValue {
    JsonValue::from_text(raw).expect("fixture must parse")
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn string_literal() {
    assert_eq!(JsonValue::from_literal("one").unwrap(), text(r#""one""#));
}

#[test]
fn string_list_literal() {
    assert_eq!(
        JsonValue::from_literal(&["one", "two", "three"]).unwrap(),
        text(r#"["one","two","three"]"#)
    );
}

#[test]
fn heterogeneous_object_literal() {
    let fixture = BTreeMap::from([("string", AnyJson::from("a")), ("int", AnyJson::from(3))]);
    assert_eq!(
        JsonValue::from_literal(&fixture).unwrap(),
        text(r#"{"string":"a","int":3}"#)
    );
    assert_ne!(
        JsonValue::from_literal(&fixture).unwrap(),
        text(r#"{"string":"b","int":4}"#)
    );
}

#[test]
fn object_literal_in_any_key_order() {
    let forward: Vec<(&str, i32)> = vec![("a", 1), ("b", 2), ("c", 3)];
    let backward: Vec<(&str, i32)> = forward.iter().rev().copied().collect();
    let a: BTreeMap<&str, i32> = forward.into_iter().collect();
    let b: std::collections::HashMap<&str, i32> = backward.into_iter().collect();
    assert_eq!(
        JsonValue::from_literal(&a).unwrap(),
        JsonValue::from_literal(&b).unwrap()
    );
}

#[test]
fn unit_and_none_are_null() {
    assert_eq!(JsonValue::from_literal(&()).unwrap(), JsonValue::Null);
    assert_eq!(JsonValue::from_literal(&None::<String>).unwrap(), JsonValue::Null);
}

#[test]
fn float_literal_equals_integer_text() {
    assert_eq!(JsonValue::from_literal(&3.0f32).unwrap(), text("3"));
}

#[test]
fn non_finite_literal_is_rejected() {
    assert_eq!(
        JsonValue::from_literal(&f64::NEG_INFINITY),
        Err(ConstructionError::NonFiniteNumber(f64::NEG_INFINITY))
    );
    assert_eq!(
        ConstructionError::NonFiniteNumber(f64::INFINITY).to_string(),
        "number inf has no JSON representation"
    );
}

// ---------------------------------------------------------------------------
// Raw text
// ---------------------------------------------------------------------------

#[test]
fn text_grammar_matrix() {
    for ok in [
        "null",
        "true",
        "false",
        "0",
        "-12.5e-3",
        r#""\"\\\/\b\f\n\r\tA""#,
        "[]",
        "{}",
        r#" { "a" : [ 1 , { "b" : null } ] } "#,
    ] {
        assert!(JsonValue::from_text(ok).is_ok(), "{ok} should parse");
    }
}

#[test]
fn malformed_text_is_rejected_not_null() {
    for bad in [
        "",
        "nul",
        "[1,]",
        "{\"a\":}",
        "{'a': 1}",
        "01",
        "1.",
        "\"unterminated",
        "[1] [2]",
        "NaN",
        "{\"a\" 1}",
    ] {
        let err = JsonValue::from_text(bad).expect_err(bad);
        assert_eq!(err.text, bad);
        assert!(err.offset <= bad.len());
    }
}
