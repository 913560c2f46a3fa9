//! Parameter families.
//!
//! A family is a class of query directive ("append", "sort", ...) that shares
//! the same resolution and validation shape. Resolvers are generic over a
//! zero-sized marker type so each family gets its own configuration entry and
//! its own rejection kind.

use std::fmt;

/// Logical key of a parameter family.
///
/// Used to look up the wire parameter name and delimiter in
/// [`QueryConfig`](crate::QueryConfig), and to tag rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Optional relations/fields appended to the response
    Append,
    /// Sort directives, optionally prefixed with `-`
    Sort,
    /// Filter values (`filter[name]=...`)
    Filter,
}

impl QueryKind {
    /// All kinds, in configuration order.
    pub const ALL: [QueryKind; 3] = [QueryKind::Append, QueryKind::Sort, QueryKind::Filter];

    /// Position of this kind in [`ALL`](Self::ALL).
    pub(crate) fn index(self) -> usize {
        match self {
            QueryKind::Append => 0,
            QueryKind::Sort => 1,
            QueryKind::Filter => 2,
        }
    }

    /// Returns the logical name, which is also the default wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Append => "append",
            QueryKind::Sort => "sort",
            QueryKind::Filter => "filter",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter family whose requested values are checked against an allow-list.
pub trait Family {
    /// The logical key for configuration lookups and rejections.
    const KIND: QueryKind;

    /// Returns the part of a requested value that must appear in the allow-list.
    ///
    /// Rejections always report the requested value itself, not this key.
    fn comparison_key(value: &str) -> &str {
        value
    }
}

/// Marker type for the "append" family.
///
/// Requested appends are compared with the allow-list verbatim.
#[derive(Debug, Clone, Copy)]
pub struct Appends {
    _private: (),
}

impl Family for Appends {
    const KIND: QueryKind = QueryKind::Append;
}

/// Marker type for the "sort" family.
///
/// A leading `-` marks a descending sort and is ignored when checking the
/// allow-list, so allowing `name` permits both `name` and `-name`.
#[derive(Debug, Clone, Copy)]
pub struct Sorts {
    _private: (),
}

impl Family for Sorts {
    const KIND: QueryKind = QueryKind::Sort;

    fn comparison_key(value: &str) -> &str {
        value.strip_prefix('-').unwrap_or(value)
    }
}
