//! The assertion surface.
//!
//! Every assertion prints a line (pass or fail) before returning, and a
//! failure comes back as `Err(AssertionError)` so tests can use `?`:
//!
//! ```
//! use std::sync::Arc;
//! use visible_assertions::assertions::VisibleAssertions;
//! use visible_assertions::context::RenderingContext;
//! use visible_assertions::sink::CaptureBuffer;
//!
//! let capture = CaptureBuffer::new();
//! let ctx = RenderingContext::builder().ansi(false).sink(capture.sink()).build();
//! let va = VisibleAssertions::new(Arc::new(ctx));
//!
//! va.assert_equals("answers match", 42, 42).unwrap();
//! let err = va.assert_equals("names match", "B", "A").unwrap_err();
//!
//! assert_eq!(err.to_string(), "names match: 'A' does not equal expected 'B'");
//! assert_eq!(
//!     capture.contents(),
//!     "        ✔ answers match\n\
//!      \x20       ✘ names match\n\
//!      \x20           'A' does not equal expected 'B'\n"
//! );
//! ```

use std::error::Error;
use std::panic::{UnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::config::{AssertConfig, EqualityHint};
use crate::context::RenderingContext;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::report::{Outcome, Reporter};
use crate::value::{Describe, error_kind_name, short_type_name, typed_error_name};

/// What an `assert_throws_boxed` closure returns on failure.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The error a throwing closure produced.
struct Thrown {
    is_expected: bool,
    kind: String,
}

#[derive(Debug, Clone)]
pub struct VisibleAssertions {
    reporter: Reporter,
    equality_hint: EqualityHint,
}

impl Default for VisibleAssertions {
    fn default() -> Self {
        Self::new(Arc::new(RenderingContext::new()))
    }
}

impl VisibleAssertions {
    pub fn new(ctx: Arc<RenderingContext>) -> Self {
        Self {
            reporter: Reporter::new(ctx),
            equality_hint: EqualityHint::default(),
        }
    }

    pub fn from_config(config: &AssertConfig) -> Self {
        Self::new(Arc::new(RenderingContext::from_config(config)))
            .with_equality_hint(config.equality_hint)
    }

    pub fn with_equality_hint(mut self, equality_hint: EqualityHint) -> Self {
        self.equality_hint = equality_hint;
        self
    }

    pub fn equality_hint(&self) -> EqualityHint {
        self.equality_hint
    }

    pub fn rendering_context(&self) -> &Arc<RenderingContext> {
        self.reporter.rendering_context()
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn info(&self, message: &str) {
        self.reporter.info(message);
    }

    pub fn warn(&self, message: &str) {
        self.reporter.warn(message);
    }

    pub fn context(&self, label: &str) {
        self.reporter.context(label);
    }

    pub fn context_indented(&self, label: &str, indent: usize) {
        self.reporter.context_indented(label, indent);
    }

    pub fn assert_true(&self, message: &str, condition: bool) -> Result {
        self.reporter.report(message, Outcome::from_bool(condition))
    }

    pub fn assert_false(&self, message: &str, condition: bool) -> Result {
        self.reporter.report(message, Outcome::from_bool(!condition))
    }

    /// Value equality; two nulls are equal.
    pub fn assert_equals<E, A>(&self, message: &str, expected: E, actual: A) -> Result
    where
        E: PartialEq<A> + Describe,
        A: Describe,
    {
        let outcome = if values_equal(&expected, &actual) {
            Outcome::Pass
        } else {
            Outcome::fail_with(self.inequality_hint(&expected, &actual))
        };
        self.reporter.report(message, outcome)
    }

    pub fn assert_not_equals<E, A>(&self, message: &str, expected: E, actual: A) -> Result
    where
        E: PartialEq<A> + Describe,
        A: Describe,
    {
        let outcome = if values_equal(&expected, &actual) {
            Outcome::fail_with(format!(
                "{} equals {}",
                actual.describe(),
                expected.describe()
            ))
        } else {
            Outcome::Pass
        };
        self.reporter.report(message, outcome)
    }

    pub fn assert_null<T: Describe>(&self, message: &str, value: Option<T>) -> Result {
        let outcome = match &value {
            None => Outcome::Pass,
            Some(v) => Outcome::fail_with(format!("{} is not null", v.describe())),
        };
        self.reporter.report(message, outcome)
    }

    pub fn assert_not_null<T>(&self, message: &str, value: Option<T>) -> Result {
        self.reporter
            .report(message, Outcome::from_bool(value.is_some()))
    }

    /// Identity, not equality: both references must point at the same value.
    pub fn assert_same<T: Describe + ?Sized>(
        &self,
        message: &str,
        expected: &T,
        actual: &T,
    ) -> Result {
        let outcome = if std::ptr::eq(expected, actual) {
            Outcome::Pass
        } else {
            Outcome::fail_with(format!(
                "{} is not the same (!=) as expected {}",
                actual.describe(),
                expected.describe()
            ))
        };
        self.reporter.report(message, outcome)
    }

    pub fn assert_that<T, M: Matcher<T>>(&self, what: &str, actual: T, matcher: M) -> Result {
        if matcher.matches(&actual) {
            self.reporter
                .report(&format!("{what} {}", matcher.describe()), Outcome::Pass)
        } else {
            let hint = format!(
                "asserted that it {} but {}",
                matcher.describe(),
                matcher.describe_mismatch(&actual)
            );
            self.reporter
                .report(&format!("assertion on {what} failed"), Outcome::fail_with(hint))
        }
    }

    /// Passes only when `f` fails with an error whose concrete type is `E`.
    ///
    /// The closure's error type is known here, so a mismatch is reported
    /// under that type's name.
    ///
    /// ```
    /// # use std::num::ParseIntError;
    /// # use visible_assertions::assertions::VisibleAssertions;
    /// # use visible_assertions::context::RenderingContext;
    /// # use visible_assertions::sink::CaptureBuffer;
    /// # let ctx = RenderingContext::builder().ansi(false).sink(CaptureBuffer::new().sink()).build();
    /// # let va = VisibleAssertions::new(std::sync::Arc::new(ctx));
    /// va.assert_throws::<ParseIntError, _, _>("rejects words", || "seven".parse::<i32>())
    ///     .unwrap();
    /// ```
    pub fn assert_throws<E, T, X>(
        &self,
        message: &str,
        f: impl FnOnce() -> std::result::Result<T, X>,
    ) -> Result
    where
        E: Error + 'static,
        X: Error + 'static,
    {
        let thrown = f().err().map(|err| Thrown {
            is_expected: (&err as &(dyn Error + 'static)).is::<E>(),
            kind: typed_error_name(&err),
        });
        self.report_thrown::<E>(message, thrown)
    }

    /// Like [`assert_throws`](Self::assert_throws) for closures which mix
    /// error types behind `?` and return a [`BoxError`].
    ///
    /// ```
    /// # use std::num::ParseIntError;
    /// # use visible_assertions::assertions::VisibleAssertions;
    /// # use visible_assertions::context::RenderingContext;
    /// # use visible_assertions::sink::CaptureBuffer;
    /// # let ctx = RenderingContext::builder().ansi(false).sink(CaptureBuffer::new().sink()).build();
    /// # let va = VisibleAssertions::new(std::sync::Arc::new(ctx));
    /// va.assert_throws_boxed::<ParseIntError, _>("rejects words", || {
    ///     let n: i32 = "seven".parse()?;
    ///     Ok(n)
    /// })
    /// .unwrap();
    /// ```
    pub fn assert_throws_boxed<E, T>(
        &self,
        message: &str,
        f: impl FnOnce() -> std::result::Result<T, BoxError>,
    ) -> Result
    where
        E: Error + 'static,
    {
        let thrown = f().err().map(|err| Thrown {
            is_expected: err.is::<E>(),
            kind: error_kind_name(&*err),
        });
        self.report_thrown::<E>(message, thrown)
    }

    fn report_thrown<E: Error + 'static>(&self, message: &str, thrown: Option<Thrown>) -> Result {
        let expected = short_type_name::<E>();
        let outcome = match thrown {
            None => Outcome::fail_with(format!("Expected {expected} was not thrown")),
            Some(Thrown {
                is_expected: true, ..
            }) => Outcome::Pass,
            Some(Thrown { kind, .. }) => {
                tracing::debug!(actual = %kind, expected = %expected, "Unexpected error kind");
                Outcome::fail_with(format!("{kind} was thrown instead of {expected}"))
            }
        };
        self.reporter.report(message, outcome)
    }

    /// Passes when `f` panics.
    pub fn assert_panics<F, R>(&self, message: &str, f: F) -> Result
    where
        F: FnOnce() -> R + UnwindSafe,
    {
        let outcome = match catch_unwind(f) {
            Ok(_) => Outcome::fail_with("Expected a panic but none occurred"),
            Err(_) => Outcome::Pass,
        };
        self.reporter.report(message, outcome)
    }

    /// Fail unconditionally.
    pub fn fail(&self, message: &str) -> Result {
        Err(self.reporter.fail(message, None))
    }

    fn inequality_hint<E: Describe, A: Describe>(&self, expected: &E, actual: &A) -> String {
        let mut expected_text = expected.describe();
        let mut actual_text = actual.describe();
        if self.equality_hint == EqualityHint::TypeAnnotated
            && expected_text == actual_text
            && !expected.is_null()
        {
            expected_text = format!("{expected_text} [{}]", short_type_name::<E>());
            actual_text = format!("{actual_text} [{}]", short_type_name::<A>());
        }
        format!("{actual_text} does not equal expected {expected_text}")
    }
}

fn values_equal<E, A>(expected: &E, actual: &A) -> bool
where
    E: PartialEq<A> + Describe,
    A: Describe,
{
    (expected.is_null() && actual.is_null()) || expected == actual
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;
    use crate::sink::CaptureBuffer;

    fn harness() -> (VisibleAssertions, CaptureBuffer) {
        let capture = CaptureBuffer::new();
        let ctx = RenderingContext::builder()
            .ansi(false)
            .width(80)
            .sink(capture.sink())
            .build();
        (VisibleAssertions::new(Arc::new(ctx)), capture)
    }

    #[derive(Debug)]
    struct OtherError;

    impl std::fmt::Display for OtherError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("other")
        }
    }

    impl Error for OtherError {}

    #[derive(Debug)]
    struct Wrapper(ParseIntError);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_true_and_false() {
        let (va, out) = harness();
        assert!(va.assert_true("it should be true", true).is_ok());
        assert!(va.assert_false("it should be false", false).is_ok());
        let err = va.assert_true("it should be true", false).unwrap_err();
        assert_eq!(err.to_string(), "it should be true");
        assert_eq!(err.hint(), None);
        assert_eq!(
            out.contents(),
            "        ✔ it should be true\n        ✔ it should be false\n        ✘ it should be true\n"
        );
    }

    #[test]
    fn test_equals() {
        let (va, _) = harness();
        assert!(va.assert_equals("same text", "A", "A").is_ok());
        assert!(va.assert_equals("String and str", String::from("A"), "A").is_ok());
        assert!(va.assert_equals("both null", None::<&str>, None::<&str>).is_ok());

        let err = va.assert_equals("it should be equal", "B", "A").unwrap_err();
        assert_eq!(err.hint(), Some("'A' does not equal expected 'B'"));
    }

    #[test]
    fn test_equals_with_null() {
        let (va, _) = harness();
        let err = va.assert_equals("m", None::<&str>, Some("A")).unwrap_err();
        assert_eq!(err.hint(), Some("'A' does not equal expected null"));
        let err = va.assert_equals("m", Some("A"), None::<&str>).unwrap_err();
        assert_eq!(err.hint(), Some("null does not equal expected 'A'"));
    }

    #[test]
    fn test_type_annotated_hint_when_text_matches() {
        let (va, _) = harness();
        let err = va.assert_equals("floats", f64::NAN, f64::NAN).unwrap_err();
        assert_eq!(
            err.hint(),
            Some("'NaN' [f64] does not equal expected 'NaN' [f64]")
        );

        let plain = va.clone().with_equality_hint(EqualityHint::Plain);
        let err = plain.assert_equals("floats", f64::NAN, f64::NAN).unwrap_err();
        assert_eq!(err.hint(), Some("'NaN' does not equal expected 'NaN'"));
    }

    #[test]
    fn test_not_equals_negates_equals() {
        let (va, _) = harness();
        assert!(va.assert_not_equals("different", "A", "B").is_ok());
        let err = va.assert_not_equals("same", "A", "A").unwrap_err();
        assert_eq!(err.hint(), Some("'A' equals 'A'"));
        assert!(va.assert_not_equals("both null", None::<i32>, None::<i32>).is_err());
    }

    #[test]
    fn test_null() {
        let (va, _) = harness();
        assert!(va.assert_null("absent", None::<&str>).is_ok());
        let err = va.assert_null("present", Some("x")).unwrap_err();
        assert_eq!(err.to_string(), "present: 'x' is not null");

        assert!(va.assert_not_null("present", Some(1)).is_ok());
        let err = va.assert_not_null("absent", None::<i32>).unwrap_err();
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn test_same() {
        let (va, _) = harness();
        let a = String::from("A");
        let b = String::from("B");
        assert!(va.assert_same("identical", &a, &a).is_ok());
        let err = va.assert_same("identical", &a, &b).unwrap_err();
        assert_eq!(err.hint(), Some("'B' is not the same (!=) as expected 'A'"));

        let twin = a.clone();
        assert!(va.assert_same("equal but distinct", &a, &twin).is_err());
    }

    #[test]
    fn test_that() {
        use crate::matcher::{equal_to, is};

        let (va, out) = harness();
        assert!(va
            .assert_that("the string", "expected value", is(equal_to("expected value")))
            .is_ok());
        let err = va
            .assert_that("the string", "actual value", is(equal_to("expected value")))
            .unwrap_err();
        assert_eq!(err.message(), "assertion on the string failed");
        assert_eq!(
            err.hint(),
            Some(r#"asserted that it is "expected value" but was "actual value""#)
        );
        assert!(out.contents().starts_with("        ✔ the string is \"expected value\"\n"));
    }

    #[test]
    fn test_throws_exact_kind() {
        let (va, _) = harness();
        assert!(va
            .assert_throws::<ParseIntError, _, _>("parse fails", || "x".parse::<i32>())
            .is_ok());

        let err = va
            .assert_throws::<ParseIntError, _, _>("nothing thrown", || Ok::<_, OtherError>(1))
            .unwrap_err();
        assert_eq!(err.hint(), Some("Expected ParseIntError was not thrown"));

        let err = va
            .assert_throws::<ParseIntError, (), _>("wrong kind", || Err(OtherError))
            .unwrap_err();
        assert_eq!(
            err.hint(),
            Some("OtherError (other) was thrown instead of ParseIntError")
        );
    }

    #[test]
    fn test_throws_names_io_error_by_type() {
        let (va, _) = harness();
        let err = va
            .assert_throws::<ParseIntError, (), _>("io", || {
                Err(std::io::Error::other("disk"))
            })
            .unwrap_err();
        assert_eq!(err.hint(), Some("Error (disk) was thrown instead of ParseIntError"));
    }

    #[test]
    fn test_throws_names_enum_error_by_type_not_variant() {
        let (va, _) = harness();
        let err = va
            .assert_throws::<ParseIntError, _, _>("bad config", || {
                AssertConfig::from_yaml_str("equality_hint: sometimes")
            })
            .unwrap_err();
        let hint = err.hint().unwrap();
        assert!(hint.starts_with("ConfigError (invalid config: "), "{hint}");
        assert!(hint.ends_with(") was thrown instead of ParseIntError"), "{hint}");
    }

    #[test]
    fn test_throws_boxed() {
        let (va, _) = harness();
        let parse = || -> std::result::Result<i32, BoxError> { Ok("x".parse::<i32>()?) };
        assert!(va.assert_throws_boxed::<ParseIntError, _>("parse fails", parse).is_ok());

        let err = va
            .assert_throws_boxed::<ParseIntError, _>("nothing thrown", || Ok(1))
            .unwrap_err();
        assert_eq!(err.hint(), Some("Expected ParseIntError was not thrown"));

        let err = va
            .assert_throws_boxed::<ParseIntError, ()>("boxed io", || {
                Err(std::io::Error::other("disk").into())
            })
            .unwrap_err();
        let hint = err.hint().unwrap();
        assert!(hint.ends_with(" (disk) was thrown instead of ParseIntError"), "{hint}");
    }

    #[test]
    fn test_throws_ignores_wrapped_sources() {
        let (va, _) = harness();
        let err = va
            .assert_throws::<ParseIntError, (), _>("wrapped", || {
                let inner = "x".parse::<i32>().unwrap_err();
                Err(Wrapper(inner))
            })
            .unwrap_err();
        assert_eq!(
            err.hint(),
            Some("Wrapper (wrapped: invalid digit found in string) was thrown instead of ParseIntError")
        );

        let err = va
            .assert_throws_boxed::<ParseIntError, ()>("wrapped", || {
                let inner = "x".parse::<i32>().unwrap_err();
                Err(Wrapper(inner).into())
            })
            .unwrap_err();
        assert!(err.hint().unwrap().starts_with("Wrapper (wrapped: "));
    }

    #[test]
    fn test_panics() {
        let (va, _) = harness();
        assert!(va.assert_panics("index out of range", || vec![1][3]).is_ok());
        let err = va.assert_panics("no panic", || 1 + 1).unwrap_err();
        assert_eq!(err.hint(), Some("Expected a panic but none occurred"));
    }

    #[test]
    fn test_fail_prints_then_errors() {
        let (va, out) = harness();
        let err = va.fail("Should fail").unwrap_err();
        assert_eq!(err.to_string(), "Should fail");
        assert_eq!(out.contents(), "        ✘ Should fail\n");
    }

    #[test]
    fn test_from_config_uses_hint_strategy() {
        let config = AssertConfig {
            equality_hint: EqualityHint::Plain,
            ..AssertConfig::default()
        };
        assert_eq!(VisibleAssertions::from_config(&config).equality_hint(), EqualityHint::Plain);
        assert_eq!(VisibleAssertions::default().equality_hint(), EqualityHint::TypeAnnotated);
    }
}
