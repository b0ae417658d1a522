//! Composable matchers for `assert_that`.
//!
//! A matcher describes what it expects and, for a value it rejects, what
//! the value looked like instead. Both descriptions land in the failure
//! hint: `asserted that it <describe> but <describe_mismatch>`.
//!
//! ```
//! use visible_assertions::matcher::{Matcher, equal_to, is};
//!
//! let m = is(equal_to("expected value"));
//! assert!(!m.matches(&"actual value"));
//! assert_eq!(Matcher::<&str>::describe(&m), r#"is "expected value""#);
//! assert_eq!(m.describe_mismatch(&"actual value"), r#"was "actual value""#);
//! ```

use std::fmt::Debug;

pub trait Matcher<T: ?Sized> {
    fn matches(&self, actual: &T) -> bool;

    /// What a matching value looks like.
    fn describe(&self) -> String;

    /// Why `actual` was rejected.
    fn describe_mismatch(&self, actual: &T) -> String;
}

fn was<T: Debug + ?Sized>(actual: &T) -> String {
    format!("was {actual:?}")
}

#[derive(Debug, Clone)]
pub struct EqualTo<V>(V);

pub fn equal_to<V>(expected: V) -> EqualTo<V> {
    EqualTo(expected)
}

impl<T, V> Matcher<T> for EqualTo<V>
where
    T: PartialEq<V> + Debug,
    V: Debug,
{
    fn matches(&self, actual: &T) -> bool {
        *actual == self.0
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        was(actual)
    }
}

/// Decorates another matcher for readability; `is(equal_to(x))`.
#[derive(Debug, Clone)]
pub struct Is<M>(M);

pub fn is<M>(inner: M) -> Is<M> {
    Is(inner)
}

impl<T: ?Sized, M: Matcher<T>> Matcher<T> for Is<M> {
    fn matches(&self, actual: &T) -> bool {
        self.0.matches(actual)
    }

    fn describe(&self) -> String {
        format!("is {}", self.0.describe())
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        self.0.describe_mismatch(actual)
    }
}

#[derive(Debug, Clone)]
pub struct Not<M>(M);

pub fn not<M>(inner: M) -> Not<M> {
    Not(inner)
}

impl<T: Debug + ?Sized, M: Matcher<T>> Matcher<T> for Not<M> {
    fn matches(&self, actual: &T) -> bool {
        !self.0.matches(actual)
    }

    fn describe(&self) -> String {
        format!("not {}", self.0.describe())
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        was(actual)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextRelation {
    Contains,
    StartsWith,
    EndsWith,
}

/// Substring matchers over anything that is `AsRef<str>`.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    relation: TextRelation,
    needle: String,
}

pub fn contains_string<S: Into<String>>(needle: S) -> TextMatcher {
    TextMatcher {
        relation: TextRelation::Contains,
        needle: needle.into(),
    }
}

pub fn starts_with<S: Into<String>>(prefix: S) -> TextMatcher {
    TextMatcher {
        relation: TextRelation::StartsWith,
        needle: prefix.into(),
    }
}

pub fn ends_with<S: Into<String>>(suffix: S) -> TextMatcher {
    TextMatcher {
        relation: TextRelation::EndsWith,
        needle: suffix.into(),
    }
}

impl<T: AsRef<str> + ?Sized> Matcher<T> for TextMatcher {
    fn matches(&self, actual: &T) -> bool {
        let actual = actual.as_ref();
        match self.relation {
            TextRelation::Contains => actual.contains(&self.needle),
            TextRelation::StartsWith => actual.starts_with(&self.needle),
            TextRelation::EndsWith => actual.ends_with(&self.needle),
        }
    }

    fn describe(&self) -> String {
        let relation = match self.relation {
            TextRelation::Contains => "containing",
            TextRelation::StartsWith => "starting with",
            TextRelation::EndsWith => "ending with",
        };
        format!("a string {relation} {:?}", self.needle)
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        was(actual.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Greater,
    Less,
}

#[derive(Debug, Clone)]
pub struct OrderedBy<V> {
    direction: Direction,
    bound: V,
}

pub fn greater_than<V>(bound: V) -> OrderedBy<V> {
    OrderedBy {
        direction: Direction::Greater,
        bound,
    }
}

pub fn less_than<V>(bound: V) -> OrderedBy<V> {
    OrderedBy {
        direction: Direction::Less,
        bound,
    }
}

impl<T, V> Matcher<T> for OrderedBy<V>
where
    T: PartialOrd<V> + Debug,
    V: Debug,
{
    fn matches(&self, actual: &T) -> bool {
        match self.direction {
            Direction::Greater => *actual > self.bound,
            Direction::Less => *actual < self.bound,
        }
    }

    fn describe(&self) -> String {
        match self.direction {
            Direction::Greater => format!("a value greater than {:?}", self.bound),
            Direction::Less => format!("a value less than {:?}", self.bound),
        }
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        was(actual)
    }
}

/// Matches when every inner matcher does.
pub struct AllOf<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

pub fn all_of<T: ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AllOf<T> {
    AllOf { matchers }
}

impl<T: ?Sized> Matcher<T> for AllOf<T> {
    fn matches(&self, actual: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(actual))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("({})", parts.join(" and "))
    }

    /// Reports the first inner matcher that rejected the value.
    fn describe_mismatch(&self, actual: &T) -> String {
        self.matchers
            .iter()
            .find(|m| !m.matches(actual))
            .map(|m| format!("{} {}", m.describe(), m.describe_mismatch(actual)))
            .unwrap_or_default()
    }
}

/// A matcher built from a predicate and its description.
pub struct Predicate<F> {
    description: String,
    predicate: F,
}

pub fn matching<S: Into<String>, F>(description: S, predicate: F) -> Predicate<F> {
    Predicate {
        description: description.into(),
        predicate,
    }
}

impl<T, F> Matcher<T> for Predicate<F>
where
    T: Debug + ?Sized,
    F: Fn(&T) -> bool,
{
    fn matches(&self, actual: &T) -> bool {
        (self.predicate)(actual)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        was(actual)
    }
}
