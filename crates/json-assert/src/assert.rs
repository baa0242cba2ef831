//! The JSON coding assertions.
//!
//! Every helper is `#[track_caller]`, records at most one failure per checked
//! value on the given [`Reporter`], and returns whether the check passed.
//! Nothing here panics or returns an error; encode and decode problems are
//! reported with their own [`FailureKind`] so they can be told apart from a
//! plain value mismatch.

use std::any::type_name;
use std::fmt::Debug;

use jsonkit_value::JsonValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::enumerable::Enumerable;
use crate::report::{Failure, FailureKind, Location, Reporter};

/// Check that `value` serializes to JSON structurally equal to `expected`.
///
/// Object key order and integer/float spelling in the encoder output do not
/// matter; array order does.
#[track_caller]
pub fn assert_encodes<T, R>(reporter: &R, value: &T, expected: &JsonValue) -> bool
where
    T: Serialize + ?Sized,
    R: Reporter + ?Sized,
{
    let location = Location::caller();
    debug!(%location, ty = type_name::<T>(), "assert_encodes");
    let Some(actual) = encode(reporter, value, location) else {
        return false;
    };
    let Some(mismatch) = expected.diff(&actual) else {
        return true;
    };
    reporter.record_failure(Failure::new(
        FailureKind::Mismatch,
        format!(
            "{} does not encode to the expected JSON, {mismatch}\n  expected: {expected}\n    actual: {actual}",
            type_name::<T>()
        ),
        location,
    ));
    false
}

/// Check that `json` deserializes into a value equal to `expected`.
///
/// Comparison uses `T`'s own `PartialEq`.
#[track_caller]
pub fn assert_decodes<T, R>(reporter: &R, json: &JsonValue, expected: &T) -> bool
where
    T: DeserializeOwned + PartialEq + Debug,
    R: Reporter + ?Sized,
{
    let location = Location::caller();
    debug!(%location, ty = type_name::<T>(), "assert_decodes");
    let text = match serde_json::to_string(json) {
        Ok(text) => text,
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Encode,
                format!("could not render JSON fixture: {err}"),
                location,
            ));
            return false;
        }
    };
    let Some(decoded) = decode::<T, R>(reporter, &text, location) else {
        return false;
    };
    if decoded == *expected {
        return true;
    }
    reporter.record_failure(Failure::new(
        FailureKind::Mismatch,
        format!(
            "{text} does not decode to the expected {}\n  expected: {expected:?}\n    actual: {decoded:?}",
            type_name::<T>()
        ),
        location,
    ));
    false
}

/// Check that `value` survives encode-then-decode unchanged.
#[track_caller]
pub fn assert_round_trips<T, R>(reporter: &R, value: &T) -> bool
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
    R: Reporter + ?Sized,
{
    let location = Location::caller();
    debug!(%location, ty = type_name::<T>(), "assert_round_trips");
    round_trip(reporter, value, location, None)
}

/// Round-trip every member of `T` in [`Enumerable::all_cases`] order.
///
/// Each broken member gets its own failure naming it; checking continues
/// past failures. Returns the number of members that failed.
#[track_caller]
pub fn assert_round_trips_all<T, R>(reporter: &R) -> usize
where
    T: Enumerable + Serialize + DeserializeOwned + PartialEq + Debug,
    R: Reporter + ?Sized,
{
    let location = Location::caller();
    let cases = T::all_cases();
    let total = cases.len();
    debug!(%location, ty = type_name::<T>(), total, "assert_round_trips_all");
    cases
        .iter()
        .enumerate()
        .filter(|(index, case)| !round_trip(reporter, *case, location, Some((*index, total))))
        .count()
}

fn round_trip<T, R>(reporter: &R, value: &T, location: Location, case: Option<(usize, usize)>) -> bool
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
    R: Reporter + ?Sized,
{
    let subject = match case {
        Some((index, total)) => format!("case {} of {total}, {value:?},", index + 1),
        None => format!("{value:?}"),
    };
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Encode,
                format!("could not encode {subject}: {err}"),
                location,
            ));
            return false;
        }
    };
    let decoded: T = match serde_json::from_str(&text) {
        Ok(decoded) => decoded,
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Decode,
                format!("{subject} encoded as {text} could not be decoded back: {err}"),
                location,
            ));
            return false;
        }
    };
    if decoded == *value {
        return true;
    }
    reporter.record_failure(Failure::new(
        FailureKind::Mismatch,
        format!(
            "{subject} does not survive a JSON round trip\n  expected: {value:?}\n    actual: {decoded:?}\n   encoded: {text}"
        ),
        location,
    ));
    false
}

fn encode<T, R>(reporter: &R, value: &T, location: Location) -> Option<JsonValue>
where
    T: Serialize + ?Sized,
    R: Reporter + ?Sized,
{
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Encode,
                format!("could not encode {}: {err}", type_name::<T>()),
                location,
            ));
            return None;
        }
    };
    match JsonValue::from_text(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Encode,
                format!("{} encoded to invalid JSON: {err}", type_name::<T>()),
                location,
            ));
            None
        }
    }
}

fn decode<T, R>(reporter: &R, text: &str, location: Location) -> Option<T>
where
    T: DeserializeOwned,
    R: Reporter + ?Sized,
{
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            reporter.record_failure(Failure::new(
                FailureKind::Decode,
                format!("could not decode {} from {text}: {err}", type_name::<T>()),
                location,
            ));
            None
        }
    }
}
