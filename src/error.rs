use std::fmt;

use crate::family::QueryKind;

/// Errors that can occur while resolving query directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested values were not in the allow-list
    InvalidQuery(InvalidQuery),
    /// A filter value could not be used
    InvalidFilterValue(InvalidFilterValue),
    /// The resolver configuration is unusable
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidQuery(e) => write!(f, "{}", e),
            Error::InvalidFilterValue(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidQuery(e) => Some(e),
            Error::InvalidFilterValue(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

impl From<InvalidQuery> for Error {
    fn from(e: InvalidQuery) -> Self {
        Error::InvalidQuery(e)
    }
}

impl From<InvalidFilterValue> for Error {
    fn from(e: InvalidFilterValue) -> Self {
        Error::InvalidFilterValue(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// Requested values that are not in the allow-list of their family.
///
/// Carries both the rejected values (requested minus allowed, in request
/// order) and the full allow-list at the time of failure, so callers can build
/// their own response instead of parsing [`message`](Self::message).
///
/// Only constructed with a non-empty rejected set: the constructors return
/// `None` when nothing was rejected.
///
/// # Examples
///
/// ```
/// use query_allowlist::{InvalidQuery, QueryKind};
///
/// let err = InvalidQuery::appends_not_allowed(
///     vec!["roles".to_string()],
///     vec!["profile".to_string()],
/// )
/// .expect("one value rejected");
///
/// assert_eq!(err.kind(), QueryKind::Append);
/// assert_eq!(
///     err.message(),
///     "Requested append(s) `roles` are not allowed. Allowed append(s) are `profile`."
/// );
///
/// assert!(InvalidQuery::appends_not_allowed(Vec::new(), vec!["profile".to_string()]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuery {
    kind: QueryKind,
    rejected: Vec<String>,
    allowed: Vec<String>,
}

impl InvalidQuery {
    /// Creates a rejection for the given family, or `None` if nothing was rejected.
    pub(crate) fn new(
        kind: QueryKind,
        rejected: Vec<String>,
        allowed: Vec<String>,
    ) -> Option<Self> {
        if rejected.is_empty() {
            return None;
        }

        Some(Self {
            kind,
            rejected,
            allowed,
        })
    }

    /// Creates a rejection for requested appends, or `None` if `rejected` is empty.
    pub fn appends_not_allowed(rejected: Vec<String>, allowed: Vec<String>) -> Option<Self> {
        Self::new(QueryKind::Append, rejected, allowed)
    }

    /// Creates a rejection for requested sorts, or `None` if `rejected` is empty.
    pub fn sorts_not_allowed(rejected: Vec<String>, allowed: Vec<String>) -> Option<Self> {
        Self::new(QueryKind::Sort, rejected, allowed)
    }

    /// Returns the family whose values were rejected.
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Returns the requested values that are not allowed, in request order.
    pub fn rejected_values(&self) -> &[String] {
        &self.rejected
    }

    /// Returns the full allow-list the request was checked against.
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed
    }

    /// Returns the human-readable summary.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InvalidQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requested {kind}(s) `{rejected}` are not allowed. Allowed {kind}(s) are `{allowed}`.",
            kind = self.kind,
            rejected = self.rejected.join(", "),
            allowed = self.allowed.join(", "),
        )
    }
}

impl std::error::Error for InvalidQuery {}

/// A filter value that cannot be evaluated.
///
/// The message embeds the offending raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFilterValue {
    value: String,
}

impl InvalidFilterValue {
    /// Creates an error for the given raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the raw value that was rejected.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidFilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter value `{}` is invalid.", self.value)
    }
}

impl std::error::Error for InvalidFilterValue {}

/// Configuration that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The array delimiter for a family was empty
    EmptyDelimiter {
        /// The family being configured
        kind: QueryKind,
    },
    /// The wire parameter name for a family was empty
    EmptyParameterName {
        /// The family being configured
        kind: QueryKind,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDelimiter { kind } => {
                write!(f, "delimiter for '{}' must not be empty", kind)
            }
            ConfigError::EmptyParameterName { kind } => {
                write!(f, "parameter name for '{}' must not be empty", kind)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
