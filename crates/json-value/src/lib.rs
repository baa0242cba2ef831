//! jsonkit-value - JSON value model for fixture comparison.
//!
//! [`JsonValue`] is a tagged union over the six JSON types whose equality is
//! purely structural: objects ignore key order, arrays do not, and numbers
//! compare by value (`1 == 1.0`). It can be built from raw text
//! ([`JsonValue::from_text`]), from native literals
//! ([`JsonValue::from_literal`]), or from a `serde_json::Value`, and
//! [`JsonValue::diff`] explains the first point where two trees diverge.

mod diff;
mod literal;
mod number;
mod parse;
mod pointer;
mod serde_impl;
mod value;

pub use diff::{Mismatch, MismatchKind};
pub use literal::{AnyJson, ConstructionError, ToJsonValue};
pub use number::Number;
pub use parse::ParseError;
pub use pointer::PointerError;
pub use value::{JsonValue, ValueKind};
