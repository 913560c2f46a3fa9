use std::fmt;

/// Direction of a requested sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// No prefix, e.g. `name`
    Ascending,
    /// Leading `-`, e.g. `-name`
    Descending,
}

/// A requested sort split into field name and direction.
///
/// # Examples
///
/// ```
/// use query_allowlist::{SortDirection, SortField};
///
/// let sort = SortField::parse("-created_at");
/// assert_eq!(sort.field(), "created_at");
/// assert_eq!(sort.direction(), SortDirection::Descending);
/// assert_eq!(sort.to_string(), "-created_at");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    field: String,
    direction: SortDirection,
}

impl SortField {
    /// Parses a requested sort value.
    ///
    /// Only one leading `-` is consumed.
    pub fn parse(value: &str) -> Self {
        match value.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                direction: SortDirection::Descending,
            },
            None => Self {
                field: value.to_string(),
                direction: SortDirection::Ascending,
            },
        }
    }

    /// Returns the field name without direction prefix.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Returns `true` for a descending sort.
    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_sorts_ascending() {
        let sort = SortField::parse("name");
        assert_eq!(sort.field(), "name");
        assert_eq!(sort.direction(), SortDirection::Ascending);
        assert!(!sort.is_descending());
    }

    #[test]
    fn only_one_prefix_is_consumed() {
        let sort = SortField::parse("--name");
        assert_eq!(sort.field(), "-name");
        assert!(sort.is_descending());
    }

    #[test]
    fn display_restores_the_requested_value() {
        for value in ["name", "-name"] {
            assert_eq!(SortField::parse(value).to_string(), value);
        }
    }
}
