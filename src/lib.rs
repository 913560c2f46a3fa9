//! Request-scoped resolution and allow-list validation of query directives.
//!
//! Endpoints let clients ask for optional extras through query parameters
//! such as `?append=profile,roles` or `?sort=-created_at,name`. This crate
//! turns those raw parameters into a normalized, de-duplicated,
//! order-preserving list of names, and fails closed when a client asks for
//! something the endpoint does not permit.
//!
//! # Core Types
//!
//! - [`ParamResolver`]: Per-request resolver for one parameter family
//!   ([`AppendResolver`], [`SortResolver`])
//! - [`AllowList`]: Normalized set of permitted names
//! - [`AllowListProvider`]: Fallback allow-list consulted when none is set
//! - [`QueryConfig`]: Wire parameter names and delimiters per family
//! - [`InvalidQuery`]: Structured rejection carrying rejected and allowed values
//! - [`FilterValue`]: Parsed `filter[...]` value
//! - [`web::ReadParameter`]: Boundary to the framework's request type
//!
//! # Examples
//!
//! ```
//! use query_allowlist::web::RequestAdapter;
//! use query_allowlist::{AppendResolver, QueryConfig};
//!
//! let request = RequestAdapter::from_query_pairs("req-123", [("append", "profile,roles,profile")]);
//! let config = QueryConfig::default();
//!
//! // Allowed appends: resolution succeeds, duplicates collapse.
//! let mut appends = AppendResolver::new(&request, &config);
//! appends.set_allowed_names(["profile", "roles"]).expect("all appends allowed");
//! assert_eq!(appends.requested_values().unwrap(), ["profile", "roles"]);
//!
//! // A narrower allow-list rejects with structured detail.
//! let mut appends = AppendResolver::new(&request, &config);
//! let err = appends.set_allowed_names("profile").unwrap_err();
//! assert_eq!(err.rejected_values(), ["roles"]);
//! assert_eq!(
//!     err.to_string(),
//!     "Requested append(s) `roles` are not allowed. Allowed append(s) are `profile`."
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allow_list;
mod config;
mod error;
mod family;
mod filter;
mod names;
mod resolver;
mod sort;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use allow_list::{AllowList, AllowListProvider};
pub use config::{ParameterNames, QueryConfig, DEFAULT_DELIMITER};
pub use error::{ConfigError, Error, InvalidFilterValue, InvalidQuery};
pub use family::{Appends, Family, QueryKind, Sorts};
pub use filter::{read_filter, FilterValue};
pub use names::{is_falsy, normalize_names, split_names, IntoNames};
pub use resolver::{AppendResolver, ParamResolver, SortResolver};
pub use sort::{SortDirection, SortField};
