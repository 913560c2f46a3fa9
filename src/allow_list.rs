use crate::names::{normalize_names, IntoNames};

/// The set of symbolic names a consumer permits for one parameter family.
///
/// Entries are normalized at construction: falsy names are dropped and
/// duplicates collapse onto their first occurrence, so iteration order is the
/// order in which names were declared.
///
/// An `AllowList` may be empty. An empty allow-list rejects every requested
/// value, which is different from having no allow-list at all.
///
/// # Examples
///
/// ```
/// use query_allowlist::AllowList;
///
/// let allowed = AllowList::new(["profile", "roles", "", "profile"]);
/// assert_eq!(allowed.as_slice(), ["profile", "roles"]);
/// assert!(allowed.contains("roles"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list from any accepted name shape.
    pub fn new(names: impl IntoNames) -> Self {
        Self {
            names: normalize_names(names.into_names()),
        }
    }

    /// Returns `true` if `name` is permitted.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the permitted names in declaration order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Iterates over the permitted names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    /// Returns the number of permitted names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is permitted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the allow-list, returning the names.
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<'a> IntoIterator for &'a AllowList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Supplies a fallback allow-list when none was set explicitly.
///
/// The provider is consulted at most until it yields a non-empty list. An
/// empty result leaves the allow-list unset, and requested values are then
/// accepted without validation.
///
/// Any `Fn() -> Vec<String>` closure is a provider.
///
/// # Examples
///
/// ```
/// use query_allowlist::AllowListProvider;
///
/// struct UserResource;
///
/// impl AllowListProvider for UserResource {
///     fn allowed_names(&self) -> Vec<String> {
///         vec!["profile".to_string(), "roles".to_string()]
///     }
/// }
///
/// assert_eq!(UserResource.allowed_names().len(), 2);
///
/// let closure = || vec!["avatar".to_string()];
/// assert_eq!(closure.allowed_names(), ["avatar"]);
/// ```
pub trait AllowListProvider {
    /// Returns the statically declared names, or an empty list for "no restriction".
    fn allowed_names(&self) -> Vec<String>;
}

impl<F> AllowListProvider for F
where
    F: Fn() -> Vec<String>,
{
    fn allowed_names(&self) -> Vec<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_entries() {
        let allowed = AllowList::new(vec!["b", "0", "a", "b", " "]);
        assert_eq!(allowed.as_slice(), ["b", "a"]);
        assert_eq!(allowed.len(), 2);
    }

    #[test]
    fn single_name_is_accepted() {
        let allowed = AllowList::new("profile");
        assert!(allowed.contains("profile"));
        assert!(!allowed.contains("roles"));
    }

    #[test]
    fn all_falsy_input_yields_empty_list() {
        let allowed = AllowList::new(["", "0"]);
        assert!(allowed.is_empty());
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let allowed = AllowList::new(["c", "a", "b"]);
        let names: Vec<&String> = allowed.iter().collect();
        assert_eq!(names, ["c", "a", "b"]);
        assert_eq!((&allowed).into_iter().count(), 3);
    }

    #[test]
    fn closure_provider_is_called() {
        let provider = || vec!["x".to_string()];
        assert_eq!(provider.allowed_names(), ["x"]);
    }

    mod proptests {
        use super::*;
        use crate::test_utils::arb_name_list;
        use proptest::prelude::*;

        proptest! {
            /// Property: every declared name is permitted, and nothing else is
            #[test]
            fn proptest_allow_list_contains_exactly_declared_names(
                names in arb_name_list(),
                candidate in "[a-f]{1,3}"
            ) {
                let allowed = AllowList::new(names.clone());

                for name in &names {
                    prop_assert!(allowed.contains(name));
                }
                prop_assert_eq!(allowed.contains(&candidate), names.contains(&candidate));
            }
        }
    }
}
