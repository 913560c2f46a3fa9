//! Request boundary.
//!
//! Resolvers never see framework request types. They read named parameters
//! through [`ReadParameter`], which a framework integration implements for its
//! own request type or satisfies by building a [`RequestAdapter`].
//!
//! # Integration Model
//!
//! Framework-specific code should:
//! 1. Implement `ReadParameter` for its request, or fill a `RequestAdapter`
//! 2. Build one resolver per family for the duration of the request
//! 3. Map [`Error`](crate::Error) to a client-error response
//!
//! # Example Flow
//!
//! ```
//! use query_allowlist::web::RequestAdapter;
//! use query_allowlist::{AppendResolver, QueryConfig};
//!
//! let request = RequestAdapter::from_query_pairs(
//!     "req-1",
//!     [("append", "profile,roles"), ("sort[]", "name")],
//! );
//! let config = QueryConfig::default();
//!
//! let mut appends = AppendResolver::new(&request, &config);
//! appends.set_allowed_names(["profile", "roles"]).expect("all allowed");
//! assert_eq!(appends.requested_values().unwrap(), ["profile", "roles"]);
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::{RawParam, ReadParameter};
