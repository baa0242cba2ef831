//! jsonkit-assert - assertions for JSON encoding and decoding of serde types.
//!
//! Three checks cover the usual fixture tests:
//!
//! - [`assert_encodes`]: a value serializes to the expected JSON,
//! - [`assert_decodes`]: a JSON fixture deserializes to the expected value,
//! - [`assert_round_trips`] / [`assert_round_trips_all`]: encode then decode
//!   gives the original back, for one value or for every member of an
//!   [`Enumerable`] type.
//!
//! Failures go to a [`Reporter`]. [`TestContext`] accumulates them so one test
//! can report several broken cases, and supports strict expected-failure
//! scopes for testing types that are meant to be broken. [`PanicReporter`]
//! fails immediately.
//!
//! ```
//! use jsonkit_assert::{assert_encodes, JsonValue, TestContext};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let cx = TestContext::new();
//! let expected = JsonValue::from_text(r#"{"y": 2, "x": 1.0}"#).unwrap();
//! assert!(assert_encodes(&cx, &Point { x: 1, y: 2 }, &expected));
//! ```

mod assert;
mod context;
mod enumerable;
mod report;

pub use assert::{assert_decodes, assert_encodes, assert_round_trips, assert_round_trips_all};
pub use context::{ExpectFailure, TestContext};
pub use enumerable::Enumerable;
pub use report::{Failure, FailureKind, Location, PanicReporter, Reporter};

pub use jsonkit_value::{AnyJson, JsonValue, ToJsonValue};
