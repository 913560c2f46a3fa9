//! Filter values.
//!
//! Filters arrive as `filter[<name>]=<value>`. Unlike appends and sorts they
//! are not checked against an allow-list here; this module only turns the raw
//! value into something a filter evaluator can use, and rejects values it
//! cannot.

use std::slice;

use crate::config::ParameterNames;
use crate::error::InvalidFilterValue;
use crate::family::QueryKind;
use crate::web::{RawParam, ReadParameter};

/// A parsed filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// One value, e.g. `filter[status]=active`
    Single(String),
    /// Several values, e.g. `filter[id]=1,2,3` or `filter[id][]=1&filter[id][]=2`
    Many(Vec<String>),
}

impl FilterValue {
    /// Parses a raw filter value.
    ///
    /// A single string containing `delimiter` becomes [`Many`](Self::Many), as
    /// does the list form. Blank items are dropped and repeated items collapse
    /// onto their first occurrence; `0` stays a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFilterValue`] if nothing usable remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_allowlist::FilterValue;
    /// use query_allowlist::web::RawParam;
    ///
    /// let value = FilterValue::parse(&RawParam::from("1,2,,3,1"), ",").unwrap();
    /// assert_eq!(value.values(), ["1", "2", "3"]);
    ///
    /// let err = FilterValue::parse(&RawParam::from(" "), ",").unwrap_err();
    /// assert_eq!(err.to_string(), "Filter value ` ` is invalid.");
    /// ```
    pub fn parse(raw: &RawParam, delimiter: &str) -> Result<Self, InvalidFilterValue> {
        let value = match raw {
            RawParam::Single(value) if !value.contains(delimiter) => {
                if value.trim().is_empty() {
                    None
                } else {
                    Some(FilterValue::Single(value.clone()))
                }
            }
            RawParam::Single(value) => non_blank(value.split(delimiter)).map(FilterValue::Many),
            RawParam::List(values) => non_blank(values.iter()).map(FilterValue::Many),
        };

        value.ok_or_else(|| InvalidFilterValue::new(raw.to_raw_string(delimiter)))
    }

    /// Returns all values, one for [`Single`](Self::Single).
    pub fn values(&self) -> &[String] {
        match self {
            FilterValue::Single(value) => slice::from_ref(value),
            FilterValue::Many(values) => values,
        }
    }

    /// Interprets the value as a boolean flag.
    ///
    /// Accepts `1/0`, `true/false`, `yes/no` and `on/off`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFilterValue`] for any other value, and for several values.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_allowlist::FilterValue;
    ///
    /// assert_eq!(FilterValue::Single("TRUE".to_string()).as_bool(), Ok(true));
    /// assert_eq!(FilterValue::Single("0".to_string()).as_bool(), Ok(false));
    /// assert!(FilterValue::Single("maybe".to_string()).as_bool().is_err());
    /// ```
    pub fn as_bool(&self) -> Result<bool, InvalidFilterValue> {
        let value = match self {
            FilterValue::Single(value) => value,
            FilterValue::Many(values) => return Err(InvalidFilterValue::new(values.join(","))),
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(InvalidFilterValue::new(value.as_str())),
        }
    }
}

fn non_blank<I, S>(items: I) -> Option<Vec<String>>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut values: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref();
        if !item.trim().is_empty() && !values.iter().any(|v| v == item) {
            values.push(item.to_string());
        }
    }

    (!values.is_empty()).then_some(values)
}

/// Reads and parses `<filter>[<name>]` from the request.
///
/// Returns `Ok(None)` when the filter is absent.
///
/// # Errors
///
/// Returns [`InvalidFilterValue`] if the filter is present but unusable.
///
/// # Examples
///
/// ```
/// use query_allowlist::web::RequestAdapter;
/// use query_allowlist::{read_filter, FilterValue, QueryConfig};
///
/// let request = RequestAdapter::from_query_pairs("req-1", [("filter[status]", "active")]);
/// let config = QueryConfig::default();
///
/// assert_eq!(
///     read_filter(&request, &config, "status").unwrap(),
///     Some(FilterValue::Single("active".to_string()))
/// );
/// assert_eq!(read_filter(&request, &config, "owner").unwrap(), None);
/// ```
pub fn read_filter<R, C>(
    request: &R,
    config: &C,
    name: &str,
) -> Result<Option<FilterValue>, InvalidFilterValue>
where
    R: ReadParameter + ?Sized,
    C: ParameterNames + ?Sized,
{
    let key = format!("{}[{}]", config.parameter_name(QueryKind::Filter), name);
    let delimiter = config.delimiter(QueryKind::Filter);

    let Some(raw) = request.read_parameter(&key) else {
        return Ok(None);
    };

    FilterValue::parse(&raw, delimiter)
        .map(Some)
        .inspect_err(|err| {
            tracing::warn!(
                request_id = request.request_id().unwrap_or("-"),
                filter = %name,
                error = %err,
                "filter value rejected"
            );
        })
}
