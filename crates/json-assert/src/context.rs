//! Failure-accumulating test context with expected-failure scopes.

use std::cell::RefCell;
use std::fmt;

use tracing::{trace, warn};

use crate::report::{Failure, FailureKind, Location, Reporter};

type Matcher = Box<dyn Fn(&Failure) -> bool>;

/// Options for an expected-failure scope.
///
/// Defaults to strict, enabled, and matching every failure kind.
///
/// ```
/// use jsonkit_assert::{ExpectFailure, FailureKind};
///
/// let options = ExpectFailure::new().only(FailureKind::Mismatch);
/// assert!(options.is_strict());
/// ```
pub struct ExpectFailure {
    strict: bool,
    enabled: bool,
    matcher: Matcher,
}

impl ExpectFailure {
    pub fn new() -> Self {
        ExpectFailure {
            strict: true,
            enabled: true,
            matcher: Box::new(|_| true),
        }
    }

    /// Strict scope expecting exactly one value mismatch.
    pub fn mismatch() -> Self {
        ExpectFailure::new().only(FailureKind::Mismatch)
    }

    /// In strict mode exactly one matching failure must be recorded inside
    /// the scope. Otherwise any number, including none, is accepted.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// A disabled scope claims nothing and never reports itself unfulfilled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn matching<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&Failure) -> bool + 'static,
    {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn only(self, kind: FailureKind) -> Self {
        self.matching(move |failure| failure.kind == kind)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ExpectFailure {
    fn default() -> Self {
        ExpectFailure::new()
    }
}

impl fmt::Debug for ExpectFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectFailure")
            .field("strict", &self.strict)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Scope {
    options: ExpectFailure,
    matched: usize,
}

impl Scope {
    fn claims(&self, failure: &Failure) -> bool {
        self.options.enabled
            && (!self.options.strict || self.matched == 0)
            && (self.options.matcher)(failure)
    }
}

#[derive(Debug, Default)]
struct State {
    failures: Vec<Failure>,
    expected: Vec<Failure>,
    scopes: Vec<Scope>,
}

/// Collects failures for one test.
///
/// Helpers record into the context instead of panicking, so a single test
/// can surface every broken case. Unexpected failures still fail the test:
/// dropping a context that holds any panics with the full list.
///
/// ```
/// use jsonkit_assert::{assert_round_trips, ExpectFailure, TestContext};
///
/// let cx = TestContext::new();
/// assert_round_trips(&cx, &vec![1, 2, 3]);
/// cx.expect_failure(ExpectFailure::new(), |cx| {
///     assert_round_trips(cx, &f64::NAN);
/// });
/// ```
#[derive(Debug, Default)]
pub struct TestContext {
    state: RefCell<State>,
}

impl TestContext {
    pub fn new() -> Self {
        TestContext::default()
    }

    /// Run `f` with an expected-failure scope armed.
    ///
    /// Failures recorded inside `f` are offered to the innermost scope first.
    /// A claimed failure is kept aside in [`expected_failures`](Self::expected_failures)
    /// and does not fail the test. When an enabled strict scope ends without
    /// a claim, a [`FailureKind::UnfulfilledExpectation`] failure is recorded
    /// at the call site as unexpected, even inside another scope.
    #[track_caller]
    pub fn expect_failure<F, T>(&self, options: ExpectFailure, f: F) -> T
    where
        F: FnOnce(&Self) -> T,
    {
        let location = Location::caller();
        self.state.borrow_mut().scopes.push(Scope {
            options,
            matched: 0,
        });
        let out = f(self);
        let scope = self.state.borrow_mut().scopes.pop();
        if let Some(scope) = scope {
            trace!(%location, matched = scope.matched, "expected-failure scope closed");
            if scope.options.enabled && scope.options.strict && scope.matched == 0 {
                // Always unexpected; enclosing scopes never claim it.
                let mut state = self.state.borrow_mut();
                push_unexpected(
                    &mut state,
                    Failure::new(
                        FailureKind::UnfulfilledExpectation,
                        "expected a matching failure, but none was recorded",
                        location,
                    ),
                );
            }
        }
        out
    }

    /// Unexpected failures recorded so far.
    pub fn failures(&self) -> Vec<Failure> {
        self.state.borrow().failures.clone()
    }

    /// Failures claimed by an expected-failure scope.
    pub fn expected_failures(&self) -> Vec<Failure> {
        self.state.borrow().expected.clone()
    }

    /// Remove and return the unexpected failures, so the context can be
    /// dropped without failing the test.
    pub fn take_failures(&self) -> Vec<Failure> {
        std::mem::take(&mut self.state.borrow_mut().failures)
    }

    pub fn is_clean(&self) -> bool {
        self.state.borrow().failures.is_empty()
    }

    /// End the test, panicking if any unexpected failure was recorded.
    pub fn finish(self) {
        drop(self);
    }
}

impl Reporter for TestContext {
    fn record_failure(&self, failure: Failure) {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        if let Some(scope) = state.scopes.iter_mut().rev().find(|s| s.claims(&failure)) {
            scope.matched += 1;
            trace!(kind = %failure.kind, location = %failure.location, "expected failure recorded");
            state.expected.push(failure);
            return;
        }
        push_unexpected(state, failure);
    }
}

fn push_unexpected(state: &mut State, failure: Failure) {
    warn!(
        kind = %failure.kind,
        location = %failure.location,
        "{}",
        failure.message
    );
    state.failures.push(failure);
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let failures = std::mem::take(&mut self.state.get_mut().failures);
        if failures.is_empty() {
            return;
        }
        let listing = failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        panic!("{} unexpected failure(s):\n{listing}", failures.len());
    }
}
