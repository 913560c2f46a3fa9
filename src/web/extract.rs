//! Parameter access trait for web integration.

use std::collections::HashMap;

/// A raw parameter value as it arrived on the request.
///
/// Query strings carry either one string (`append=a,b`) or a structured list
/// (`append[]=a&append[]=b`). Only the single form is split on the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParam {
    /// A single, possibly delimited, string
    Single(String),
    /// An already structured list of values
    List(Vec<String>),
}

impl RawParam {
    /// Returns the value as written, joining list items with `delimiter`.
    pub fn to_raw_string(&self, delimiter: &str) -> String {
        match self {
            RawParam::Single(value) => value.clone(),
            RawParam::List(values) => values.join(delimiter),
        }
    }
}

impl From<String> for RawParam {
    fn from(value: String) -> Self {
        RawParam::Single(value)
    }
}

impl From<&str> for RawParam {
    fn from(value: &str) -> Self {
        RawParam::Single(value.to_string())
    }
}

impl From<Vec<String>> for RawParam {
    fn from(values: Vec<String>) -> Self {
        RawParam::List(values)
    }
}

/// Reads named parameters from the current request.
///
/// This trait is the boundary between web framework request types and the
/// resolvers. Implementations only look values up; they do not split,
/// normalize or validate them.
///
/// # Examples
///
/// ```
/// use query_allowlist::web::{RawParam, ReadParameter};
///
/// struct MyFrameworkRequest {
///     append: Option<String>,
/// }
///
/// impl ReadParameter for MyFrameworkRequest {
///     fn read_parameter(&self, name: &str) -> Option<RawParam> {
///         match name {
///             "append" => self.append.clone().map(RawParam::Single),
///             _ => None,
///         }
///     }
/// }
///
/// let req = MyFrameworkRequest { append: Some("profile".to_string()) };
/// assert_eq!(req.read_parameter("append"), Some(RawParam::Single("profile".to_string())));
/// assert!(req.read_parameter("sort").is_none());
/// ```
pub trait ReadParameter {
    /// Returns the raw value of parameter `name`, or `None` if it is absent.
    fn read_parameter(&self, name: &str) -> Option<RawParam>;

    /// Returns an identifier for the request, used only as a logging field.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

impl<T: ReadParameter + ?Sized> ReadParameter for &T {
    fn read_parameter(&self, name: &str) -> Option<RawParam> {
        (**self).read_parameter(name)
    }

    fn request_id(&self) -> Option<&str> {
        (**self).request_id()
    }
}

impl ReadParameter for HashMap<String, String> {
    fn read_parameter(&self, name: &str) -> Option<RawParam> {
        self.get(name).cloned().map(RawParam::Single)
    }
}

impl ReadParameter for HashMap<String, RawParam> {
    fn read_parameter(&self, name: &str) -> Option<RawParam> {
        self.get(name).cloned()
    }
}
