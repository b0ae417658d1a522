//! How asserted values appear in failure hints.

use std::fmt::Debug;
use std::sync::LazyLock;

use regex::Regex;

/// Textual form of a value inside a hint.
///
/// A present value is quoted (`'A'`), an absent one is `null`.
///
/// ```
/// use visible_assertions::value::Describe;
///
/// assert_eq!("A".describe(), "'A'");
/// assert_eq!(Some(1).describe(), "'1'");
/// assert_eq!(None::<i32>.describe(), "null");
/// ```
pub trait Describe {
    fn describe(&self) -> String;

    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! describe_with_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(&self) -> String {
                    format!("'{self}'")
                }
            }
        )*
    };
}

describe_with_display!(
    str, String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> String {
        match self {
            Some(value) => value.describe(),
            None => "null".to_string(),
        }
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: Debug> Describe for [T] {
    fn describe(&self) -> String {
        format!("'{self:?}'")
    }
}

impl<T: Debug> Describe for Vec<T> {
    fn describe(&self) -> String {
        format!("'{self:?}'")
    }
}

impl Describe for () {
    fn describe(&self) -> String {
        "'()'".to_string()
    }
}

static PATH_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z_][a-z0-9_]*::").expect("Invalid type path regex"));

/// A type's name without module paths: `Option<String>` rather than
/// `core::option::Option<alloc::string::String>`.
pub fn short_type_name<T: ?Sized>() -> String {
    strip_paths(std::any::type_name::<T>())
}

pub(crate) fn strip_paths(name: &str) -> String {
    PATH_PREFIX_RE.replace_all(name, "").into_owned()
}

/// Names a thrown error whose type is known, followed by its message:
/// `ConfigError (invalid config: ..)`.
pub fn typed_error_name<X: std::error::Error>(err: &X) -> String {
    format!("{} ({err})", short_type_name::<X>())
}

/// Best-effort name of a boxed error, followed by its message.
///
/// Trait objects erase the type name, so this reads the leading identifier
/// of the `Debug` output (`ParseIntError { .. }` gives `ParseIntError`).
/// That identifier can be an enum variant rather than the type, which is
/// why the message is always appended. Errors whose `Debug` output does
/// not start with an identifier are named `error`.
pub fn error_kind_name(err: &(dyn std::error::Error + 'static)) -> String {
    let debug = format!("{err:?}");
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("error ({err})")
    } else {
        format!("{name} ({err})")
    }
}
