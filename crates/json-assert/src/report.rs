//! Failure records and the sink they are reported to.

use std::fmt;

use thiserror::Error;

/// Source position of the assertion that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// The location of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        Location::from(std::panic::Location::caller())
    }
}

impl From<&'static std::panic::Location<'static>> for Location {
    fn from(loc: &'static std::panic::Location<'static>) -> Self {
        Location {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Category of a recorded failure, used to match expected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Both sides were produced but are not equal.
    Mismatch,
    /// The value could not be serialized.
    Encode,
    /// The JSON could not be deserialized into the target type.
    Decode,
    /// A strict expected-failure scope finished without its failure.
    UnfulfilledExpectation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Mismatch => "assertion failed",
            FailureKind::Encode => "encode error",
            FailureKind::Decode => "decode error",
            FailureKind::UnfulfilledExpectation => "expected failure not recorded",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub location: Location,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>, location: Location) -> Self {
        Failure {
            kind,
            message: message.into(),
            location,
        }
    }
}

/// Receives failures from the assertion helpers.
///
/// Recording must not unwind: the helpers keep going after a failure so one
/// test can surface several broken cases.
pub trait Reporter {
    fn record_failure(&self, failure: Failure);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn record_failure(&self, failure: Failure) {
        (**self).record_failure(failure);
    }
}

/// Reporter that panics on the first failure, for use directly in `#[test]`
/// functions that do not need to accumulate failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicReporter;

impl Reporter for PanicReporter {
    fn record_failure(&self, failure: Failure) {
        panic!("{failure}");
    }
}
