//! Normalization of symbolic names.
//!
//! Requested values and allow-lists go through the same pipeline: falsy
//! tokens are dropped, duplicates collapse onto their first occurrence, and
//! the remaining order is preserved.

use std::collections::HashSet;

/// Returns `true` for tokens that are dropped silently during normalization.
///
/// A token is falsy when it is empty, consists only of whitespace, or is the
/// literal `"0"`. Falsy tokens are never reported as rejected.
pub fn is_falsy(token: &str) -> bool {
    token.trim().is_empty() || token == "0"
}

/// Normalizes a sequence of names.
///
/// # Examples
///
/// ```
/// use query_allowlist::normalize_names;
///
/// let names = normalize_names(["a", "b", "a", "", "c", "  "]);
/// assert_eq!(names, ["a", "b", "c"]);
/// ```
pub fn normalize_names<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for value in values {
        let value = value.into();
        if is_falsy(&value) || seen.contains(&value) {
            continue;
        }
        seen.insert(value.clone());
        names.push(value);
    }

    names
}

/// Splits a delimited string and normalizes the parts.
///
/// # Examples
///
/// ```
/// use query_allowlist::split_names;
///
/// assert_eq!(split_names("a,b,a,,c", ","), ["a", "b", "c"]);
/// assert_eq!(split_names("a;b;a", ";"), ["a", "b"]);
/// ```
pub fn split_names(raw: &str, delimiter: &str) -> Vec<String> {
    normalize_names(raw.split(delimiter))
}

/// Values accepted wherever a set of names is expected.
///
/// Covers a single name, a fixed list of names (the variadic form) and any
/// owned or borrowed sequence.
///
/// # Examples
///
/// ```
/// use query_allowlist::IntoNames;
///
/// assert_eq!("profile".into_names(), ["profile"]);
/// assert_eq!(["profile", "roles"].into_names(), ["profile", "roles"]);
/// assert_eq!(vec!["a".to_string()].into_names(), ["a"]);
/// ```
pub trait IntoNames {
    /// Converts into a raw, not yet normalized, list of names.
    fn into_names(self) -> Vec<String>;
}

impl IntoNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoNames for &String {
    fn into_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoNames for Vec<S> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoNames for [S; N] {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoNames for &[S] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}
