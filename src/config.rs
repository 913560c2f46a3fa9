//! Resolver configuration.
//!
//! One `QueryConfig` carries, for every [`QueryKind`], the parameter name used
//! on the wire and the delimiter that splits a single string into several
//! values. It is passed to each resolver, so changing a delimiter affects every
//! resolver built from that configuration and nothing else.
//!
//! Resolvers only depend on the [`ParameterNames`] trait, so the settings can
//! also come from an application's own configuration type.

use crate::error::ConfigError;
use crate::family::QueryKind;

/// Default delimiter for list-valued parameters.
pub const DEFAULT_DELIMITER: &str = ",";

/// Wire-level settings of each parameter family.
///
/// Maps a logical family to the parameter name it uses on the wire, and to the
/// delimiter that splits its single-string form.
///
/// # Examples
///
/// ```
/// use query_allowlist::web::RequestAdapter;
/// use query_allowlist::{AppendResolver, ParameterNames, QueryKind};
///
/// struct LegacyNames;
///
/// impl ParameterNames for LegacyNames {
///     fn parameter_name(&self, kind: QueryKind) -> &str {
///         match kind {
///             QueryKind::Append => "with",
///             other => other.as_str(),
///         }
///     }
/// }
///
/// let request = RequestAdapter::from_query_pairs("req-1", [("with", "profile,roles")]);
/// let mut appends = AppendResolver::new(&request, &LegacyNames);
/// assert_eq!(appends.requested_values().unwrap(), ["profile", "roles"]);
/// ```
pub trait ParameterNames {
    /// Returns the wire parameter name for `kind`.
    fn parameter_name(&self, kind: QueryKind) -> &str;

    /// Returns the delimiter for `kind`.
    fn delimiter(&self, _kind: QueryKind) -> &str {
        DEFAULT_DELIMITER
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KindConfig {
    parameter_name: String,
    delimiter: String,
}

impl KindConfig {
    fn defaults(kind: QueryKind) -> Self {
        Self {
            parameter_name: kind.as_str().to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// Parameter names and delimiters for every family.
///
/// # Examples
///
/// ```
/// use query_allowlist::{QueryConfig, QueryKind};
///
/// let config = QueryConfig::new()
///     .with_parameter_name(QueryKind::Append, "include")
///     .and_then(|c| c.with_delimiter(QueryKind::Sort, ";"))
///     .expect("valid configuration");
///
/// assert_eq!(config.parameter_name(QueryKind::Append), "include");
/// assert_eq!(config.delimiter(QueryKind::Sort), ";");
/// assert_eq!(config.delimiter(QueryKind::Append), ",");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    kinds: [KindConfig; 3],
}

impl QueryConfig {
    /// Creates a configuration with default names and `,` delimiters.
    pub fn new() -> Self {
        Self {
            kinds: QueryKind::ALL.map(KindConfig::defaults),
        }
    }

    /// Returns a copy with the wire name for `kind` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyParameterName`] if `name` is empty.
    pub fn with_parameter_name(
        mut self,
        kind: QueryKind,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyParameterName { kind });
        }
        self.entry_mut(kind).parameter_name = name;
        Ok(self)
    }

    /// Returns a copy with the delimiter for `kind` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDelimiter`] if `delimiter` is empty.
    pub fn with_delimiter(
        mut self,
        kind: QueryKind,
        delimiter: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.set_delimiter(kind, delimiter)?;
        Ok(self)
    }

    /// Replaces the delimiter for `kind` in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDelimiter`] if `delimiter` is empty.
    pub fn set_delimiter(
        &mut self,
        kind: QueryKind,
        delimiter: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter { kind });
        }
        tracing::debug!(kind = %kind, delimiter = %delimiter, "delimiter configured");
        self.entry_mut(kind).delimiter = delimiter;
        Ok(())
    }

    /// Returns the wire parameter name for `kind`.
    pub fn parameter_name(&self, kind: QueryKind) -> &str {
        &self.entry(kind).parameter_name
    }

    /// Returns the delimiter for `kind`.
    pub fn delimiter(&self, kind: QueryKind) -> &str {
        &self.entry(kind).delimiter
    }

    fn entry(&self, kind: QueryKind) -> &KindConfig {
        &self.kinds[kind.index()]
    }

    fn entry_mut(&mut self, kind: QueryKind) -> &mut KindConfig {
        &mut self.kinds[kind.index()]
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterNames for QueryConfig {
    fn parameter_name(&self, kind: QueryKind) -> &str {
        QueryConfig::parameter_name(self, kind)
    }

    fn delimiter(&self, kind: QueryKind) -> &str {
        QueryConfig::delimiter(self, kind)
    }
}
