//! Request adapter for mapping HTTP requests to resolver input.

use std::collections::HashMap;

use super::{RawParam, ReadParameter};

/// Framework-neutral request carrying a request id and query parameters.
///
/// `RequestAdapter` holds simple owned data so that it can be built from any
/// framework's request type, or straight from decoded query-string pairs.
///
/// # Examples
///
/// ```
/// use query_allowlist::web::{RawParam, ReadParameter, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345");
/// adapter.add_query_param("append", "profile,roles");
/// adapter.add_query_list("sort", ["name", "-age"]);
///
/// assert_eq!(adapter.request_id(), Some("req-12345"));
/// assert_eq!(
///     adapter.read_parameter("append"),
///     Some(RawParam::Single("profile,roles".to_string()))
/// );
/// assert!(matches!(adapter.read_parameter("sort"), Some(RawParam::List(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    /// Unique request identifier
    request_id: String,
    /// Query parameters from the URL
    query_params: HashMap<String, RawParam>,
}

impl RequestAdapter {
    /// Creates an adapter with no parameters.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            query_params: HashMap::new(),
        }
    }

    /// Builds an adapter from decoded query-string pairs.
    ///
    /// A key ending in `[]` appends to the list form of that parameter
    /// (`sort[]=a&sort[]=b`). A plain key sets the single form; when it repeats,
    /// the last value wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_allowlist::web::{RawParam, ReadParameter, RequestAdapter};
    ///
    /// let adapter = RequestAdapter::from_query_pairs(
    ///     "req-1",
    ///     [("sort[]", "name"), ("sort[]", "-age"), ("append", "a"), ("append", "b")],
    /// );
    ///
    /// assert_eq!(
    ///     adapter.read_parameter("sort"),
    ///     Some(RawParam::List(vec!["name".to_string(), "-age".to_string()]))
    /// );
    /// assert_eq!(adapter.read_parameter("append"), Some(RawParam::Single("b".to_string())));
    /// ```
    pub fn from_query_pairs<I, K, V>(request_id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut adapter = Self::new(request_id);

        for (key, value) in pairs {
            let key = key.into();
            match key.strip_suffix("[]") {
                Some(name) => adapter.push_query_list_item(name, value.into()),
                None => adapter.add_query_param(key, value),
            }
        }

        adapter
    }

    /// Sets a single-valued query parameter, replacing any previous value.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_params
            .insert(key.into(), RawParam::Single(value.into()));
    }

    /// Sets a list-valued query parameter, replacing any previous value.
    pub fn add_query_list<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.query_params.insert(
            key.into(),
            RawParam::List(values.into_iter().map(Into::into).collect()),
        );
    }

    /// Returns the raw query parameters.
    pub fn query_params(&self) -> &HashMap<String, RawParam> {
        &self.query_params
    }

    fn push_query_list_item(&mut self, name: &str, value: String) {
        match self.query_params.get_mut(name) {
            Some(RawParam::List(values)) => values.push(value),
            _ => {
                self.query_params
                    .insert(name.to_string(), RawParam::List(vec![value]));
            }
        }
    }
}

impl ReadParameter for RequestAdapter {
    fn read_parameter(&self, name: &str) -> Option<RawParam> {
        self.query_params.get(name).cloned()
    }

    fn request_id(&self) -> Option<&str> {
        Some(&self.request_id)
    }
}
