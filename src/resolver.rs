use std::fmt;
use std::marker::PhantomData;

use crate::{
    allow_list::{AllowList, AllowListProvider},
    config::ParameterNames,
    error::InvalidQuery,
    family::{Appends, Family, QueryKind, Sorts},
    names::{normalize_names, split_names, IntoNames},
    sort::SortField,
    web::{RawParam, ReadParameter},
};

/// Resolver for the "append" family.
pub type AppendResolver<'r, R> = ParamResolver<'r, Appends, R>;

/// Resolver for the "sort" family.
pub type SortResolver<'r, R> = ParamResolver<'r, Sorts, R>;

/// Resolves and validates the requested values of one parameter family.
///
/// A resolver lives for exactly one request. It reads the raw parameter once,
/// normalizes it, keeps the result for the rest of the request, and checks it
/// against the allow-list whenever either side becomes known:
///
/// - [`set_allowed_names`](Self::set_allowed_names) installs an allow-list and
///   immediately validates the requested values against it.
/// - [`requested_values`](Self::requested_values) first resolves the
///   allow-list (consulting the default provider, if any), then parses and
///   validates.
///
/// Both orders end in the same validated state and raise the same
/// [`InvalidQuery`] for the same input.
///
/// When no allow-list was set and the default provider yields nothing, every
/// requested value is accepted.
///
/// # Examples
///
/// ```
/// use query_allowlist::web::RequestAdapter;
/// use query_allowlist::{AppendResolver, QueryConfig};
///
/// let mut request = RequestAdapter::new("req-123");
/// request.add_query_param("append", "profile,roles");
/// let config = QueryConfig::default();
///
/// let mut appends = AppendResolver::new(&request, &config);
/// let err = appends
///     .set_allowed_names("profile")
///     .expect_err("roles is not allowed");
///
/// assert_eq!(err.rejected_values(), ["roles"]);
/// assert_eq!(err.allowed_values(), ["profile"]);
/// ```
pub struct ParamResolver<'r, F, R: ?Sized> {
    request: &'r R,
    config: &'r dyn ParameterNames,
    default_provider: Option<Box<dyn AllowListProvider + 'r>>,
    allowed: Option<AllowList>,
    requested: Option<Vec<String>>,
    _family: PhantomData<F>,
}

impl<'r, F, R> ParamResolver<'r, F, R>
where
    F: Family,
    R: ReadParameter + ?Sized,
{
    /// Creates a resolver for one request.
    ///
    /// `config` supplies the wire parameter name and delimiter of the family,
    /// usually a shared [`QueryConfig`](crate::QueryConfig).
    pub fn new(request: &'r R, config: &'r dyn ParameterNames) -> Self {
        Self {
            request,
            config,
            default_provider: None,
            allowed: None,
            requested: None,
            _family: PhantomData,
        }
    }

    /// Sets the provider consulted when no allow-list was set explicitly.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_allowlist::web::RequestAdapter;
    /// use query_allowlist::{AppendResolver, QueryConfig};
    ///
    /// let mut request = RequestAdapter::new("req-1");
    /// request.add_query_param("append", "profile");
    /// let config = QueryConfig::default();
    ///
    /// let mut appends = AppendResolver::new(&request, &config)
    ///     .with_default_allowed(|| vec!["profile".to_string()]);
    ///
    /// assert_eq!(appends.requested_values().unwrap(), ["profile"]);
    /// ```
    pub fn with_default_allowed(mut self, provider: impl AllowListProvider + 'r) -> Self {
        self.default_provider = Some(Box::new(provider));
        self
    }

    /// Returns the family this resolver handles.
    pub fn kind(&self) -> QueryKind {
        F::KIND
    }

    /// Installs the allow-list, replacing any previous one, and validates the
    /// requested values against it.
    ///
    /// Accepts a single name, an array of names, or any sequence. Falsy
    /// entries are dropped and duplicates collapse. An explicitly empty
    /// allow-list rejects every requested value.
    ///
    /// Returns the resolver again to allow chaining.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuery`] if any requested value is not permitted. The
    /// allow-list stays installed.
    pub fn set_allowed_names(
        &mut self,
        names: impl IntoNames,
    ) -> Result<&mut Self, InvalidQuery> {
        let allowed = AllowList::new(names);
        tracing::debug!(
            request_id = self.request_id(),
            kind = %F::KIND,
            allowed = allowed.len(),
            "allow-list installed"
        );
        self.allowed = Some(allowed);

        self.ensure_requested_allowed()?;
        Ok(self)
    }

    /// Returns the allow-list, deriving it from the default provider if needed.
    ///
    /// If nothing was set and the provider yields a non-empty list, that list
    /// is installed through [`set_allowed_names`](Self::set_allowed_names). If
    /// the provider is absent or yields nothing, returns `Ok(None)` and no
    /// validation takes place.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuery`] if installing the provided list rejects a
    /// requested value.
    pub fn allowed_names(&mut self) -> Result<Option<&AllowList>, InvalidQuery> {
        if self.allowed.is_none() {
            let provided = match &self.default_provider {
                Some(provider) => provider.allowed_names(),
                None => Vec::new(),
            };

            if !provided.is_empty() {
                self.set_allowed_names(provided)?;
            }
        }

        Ok(self.allowed.as_ref())
    }

    /// Returns the requested values, parsing the request on first use.
    ///
    /// Values are split on the configured delimiter (single string form) or
    /// taken as-is (list form), then normalized: falsy tokens are dropped and
    /// duplicates collapse onto their first occurrence. The result is kept for
    /// the lifetime of the resolver, so later calls return the same slice
    /// without reading the request again.
    ///
    /// An absent parameter yields an empty slice, which always passes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuery`] if an allow-list is in place and any requested
    /// value is not in it. A value rejected on first use is not kept.
    pub fn requested_values(&mut self) -> Result<&[String], InvalidQuery> {
        if self.requested.is_none() {
            self.allowed_names()?;
        }

        self.ensure_requested_allowed()?;

        Ok(self.requested.as_deref().unwrap_or(&[]))
    }

    /// Returns `true` once the requested values have been parsed and accepted.
    pub fn is_resolved(&self) -> bool {
        self.requested.is_some()
    }

    fn ensure_requested_allowed(&mut self) -> Result<(), InvalidQuery> {
        if let Some(values) = &self.requested {
            return self.check(values);
        }

        let values = self.parse_requested();
        self.check(&values)?;
        self.requested = Some(values);
        Ok(())
    }

    fn parse_requested(&self) -> Vec<String> {
        let parameter = self.config.parameter_name(F::KIND);

        let values = match self.request.read_parameter(parameter) {
            None => Vec::new(),
            Some(RawParam::Single(raw)) => split_names(&raw, self.config.delimiter(F::KIND)),
            Some(RawParam::List(raw)) => normalize_names(raw),
        };

        tracing::debug!(
            request_id = self.request_id(),
            kind = %F::KIND,
            parameter = %parameter,
            count = values.len(),
            "requested values parsed"
        );

        values
    }

    /// Computes `requested - allowed`, skipped entirely without an allow-list.
    ///
    /// A value passes when it is allowed verbatim or by its comparison key.
    fn check(&self, values: &[String]) -> Result<(), InvalidQuery> {
        let Some(allowed) = &self.allowed else {
            return Ok(());
        };

        let rejected: Vec<String> = values
            .iter()
            .filter(|value| {
                !allowed.contains(value.as_str()) && !allowed.contains(F::comparison_key(value))
            })
            .cloned()
            .collect();

        let Some(err) = InvalidQuery::new(F::KIND, rejected, allowed.as_slice().to_vec()) else {
            return Ok(());
        };

        tracing::warn!(
            request_id = self.request_id(),
            kind = %F::KIND,
            rejected = ?err.rejected_values(),
            "requested values not allowed"
        );

        Err(err)
    }

    fn request_id(&self) -> &str {
        self.request.request_id().unwrap_or("-")
    }
}

impl<'r, R> ParamResolver<'r, Sorts, R>
where
    R: ReadParameter + ?Sized,
{
    /// Returns the requested sorts split into field and direction.
    ///
    /// # Errors
    ///
    /// Same as [`requested_values`](Self::requested_values).
    ///
    /// # Examples
    ///
    /// ```
    /// use query_allowlist::web::RequestAdapter;
    /// use query_allowlist::{QueryConfig, SortDirection, SortResolver};
    ///
    /// let mut request = RequestAdapter::new("req-1");
    /// request.add_query_param("sort", "-created_at,name");
    /// let config = QueryConfig::default();
    ///
    /// let mut sorts = SortResolver::new(&request, &config);
    /// sorts.set_allowed_names(["name", "created_at"]).unwrap();
    ///
    /// let fields = sorts.sort_fields().unwrap();
    /// assert_eq!(fields[0].field(), "created_at");
    /// assert_eq!(fields[0].direction(), SortDirection::Descending);
    /// assert_eq!(fields[1].direction(), SortDirection::Ascending);
    /// ```
    pub fn sort_fields(&mut self) -> Result<Vec<SortField>, InvalidQuery> {
        Ok(self
            .requested_values()?
            .iter()
            .map(|value| SortField::parse(value))
            .collect())
    }
}

impl<F: Family, R: ?Sized> fmt::Debug for ParamResolver<'_, F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamResolver")
            .field("kind", &F::KIND)
            .field("has_default_provider", &self.default_provider.is_some())
            .field("allowed", &self.allowed)
            .field("requested", &self.requested)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryConfig;
    use crate::web::RequestAdapter;
    use std::cell::Cell;

    /// Request that counts how often a parameter is read.
    struct CountingRequest {
        inner: RequestAdapter,
        reads: Cell<usize>,
    }

    impl CountingRequest {
        fn with_append(raw: &str) -> Self {
            let mut inner = RequestAdapter::new("req-count");
            inner.add_query_param("append", raw);
            Self {
                inner,
                reads: Cell::new(0),
            }
        }
    }

    impl ReadParameter for CountingRequest {
        fn read_parameter(&self, name: &str) -> Option<RawParam> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read_parameter(name)
        }
    }

    fn request(raw: &str) -> RequestAdapter {
        let mut request = RequestAdapter::new("req-test");
        request.add_query_param("append", raw);
        request
    }

    #[test]
    fn requested_values_are_normalized() {
        let request = request("a,b,a,,c");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        assert_eq!(resolver.requested_values().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn requested_values_parse_only_once() {
        let request = CountingRequest::with_append("a,b");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        let first = resolver.requested_values().unwrap().as_ptr();
        let second = resolver.requested_values().unwrap().as_ptr();

        assert_eq!(first, second);
        assert_eq!(request.reads.get(), 1);
    }

    #[test]
    fn provider_path_parses_only_once() {
        let request = CountingRequest::with_append("a");
        let config = QueryConfig::default();
        let mut resolver =
            AppendResolver::new(&request, &config).with_default_allowed(|| vec!["a".to_string()]);

        resolver.requested_values().unwrap();
        resolver.requested_values().unwrap();

        assert_eq!(request.reads.get(), 1);
    }

    #[test]
    fn set_allowed_names_validates_immediately() {
        let request = request("profile,roles");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        let err = resolver.set_allowed_names(["profile"]).unwrap_err();

        assert_eq!(err.kind(), QueryKind::Append);
        assert_eq!(err.rejected_values(), ["roles"]);
        assert_eq!(err.allowed_values(), ["profile"]);
        assert!(!resolver.is_resolved());
    }

    #[test]
    fn set_allowed_names_chains() {
        let request = request("profile");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        let values = resolver
            .set_allowed_names("profile")
            .unwrap()
            .requested_values()
            .unwrap()
            .to_vec();

        assert_eq!(values, ["profile"]);
    }

    #[test]
    fn reassignment_revalidates_resolved_values() {
        let request = request("profile,roles");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        resolver.set_allowed_names(["profile", "roles"]).unwrap();
        assert!(resolver.is_resolved());

        let err = resolver.set_allowed_names(["roles"]).unwrap_err();
        assert_eq!(err.rejected_values(), ["profile"]);

        // The new allow-list stays in force for later reads.
        assert!(resolver.requested_values().is_err());
    }

    #[test]
    fn explicit_empty_allow_list_rejects_everything() {
        let request = request("a,b");
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        let err = resolver.set_allowed_names(Vec::<String>::new()).unwrap_err();

        assert_eq!(err.rejected_values(), ["a", "b"]);
        assert!(err.allowed_values().is_empty());
    }

    #[test]
    fn empty_provider_result_means_no_restriction() {
        let request = request("anything,goes");
        let config = QueryConfig::default();
        let mut resolver =
            AppendResolver::new(&request, &config).with_default_allowed(Vec::<String>::new);

        assert_eq!(resolver.requested_values().unwrap(), ["anything", "goes"]);
        assert!(resolver.allowed_names().unwrap().is_none());
    }

    #[test]
    fn explicit_allow_list_wins_over_provider() {
        let request = request("b");
        let config = QueryConfig::default();
        let mut resolver =
            AppendResolver::new(&request, &config).with_default_allowed(|| vec!["a".to_string()]);

        resolver.set_allowed_names("b").unwrap();

        assert_eq!(resolver.requested_values().unwrap(), ["b"]);
        assert_eq!(resolver.allowed_names().unwrap().unwrap().as_slice(), ["b"]);
    }

    #[test]
    fn rejected_first_read_is_not_kept() {
        let request = CountingRequest::with_append("x");
        let config = QueryConfig::default();
        let mut resolver =
            AppendResolver::new(&request, &config).with_default_allowed(|| vec!["a".to_string()]);

        let first = resolver.requested_values().unwrap_err();
        let second = resolver.requested_values().unwrap_err();

        assert_eq!(first, second);
        assert!(!resolver.is_resolved());
        assert_eq!(request.reads.get(), 2);
    }

    #[test]
    fn list_form_is_not_split() {
        let mut request = RequestAdapter::new("req-list");
        request.add_query_list("append", ["a,b", "c", "c"]);
        let config = QueryConfig::default();
        let mut resolver = AppendResolver::new(&request, &config);

        assert_eq!(resolver.requested_values().unwrap(), ["a,b", "c"]);
    }

    #[test]
    fn configured_parameter_name_is_read() {
        let mut request = RequestAdapter::new("req-include");
        request.add_query_param("include", "profile");
        request.add_query_param("append", "ignored");
        let config = QueryConfig::new()
            .with_parameter_name(QueryKind::Append, "include")
            .unwrap();
        let mut resolver = AppendResolver::new(&request, &config);

        assert_eq!(resolver.requested_values().unwrap(), ["profile"]);
    }

    #[test]
    fn sorts_ignore_descending_prefix_when_validating() {
        let mut request = RequestAdapter::new("req-sort");
        request.add_query_param("sort", "-name,age");
        let config = QueryConfig::default();
        let mut resolver = SortResolver::new(&request, &config);

        let err = resolver.set_allowed_names("name").unwrap_err();

        assert_eq!(err.kind(), QueryKind::Sort);
        assert_eq!(err.rejected_values(), ["age"]);
    }

    #[test]
    fn sorts_allowed_with_prefix_match_verbatim() {
        let mut request = RequestAdapter::new("req-sort");
        request.add_query_param("sort", "-name");
        let config = QueryConfig::default();
        let mut resolver = SortResolver::new(&request, &config);

        resolver.set_allowed_names("-name").unwrap();

        assert_eq!(resolver.requested_values().unwrap(), ["-name"]);
    }

    #[test]
    fn sorts_allowed_with_prefix_do_not_permit_ascending() {
        let mut request = RequestAdapter::new("req-sort");
        request.add_query_param("sort", "name");
        let config = QueryConfig::default();
        let mut resolver = SortResolver::new(&request, &config);

        let err = resolver.set_allowed_names("-name").unwrap_err();

        assert_eq!(err.rejected_values(), ["name"]);
        assert_eq!(err.allowed_values(), ["-name"]);
    }

    #[test]
    fn sort_fields_follow_request_order() {
        let mut request = RequestAdapter::new("req-sort");
        request.add_query_param("sort", "-name,age");
        let config = QueryConfig::default();
        let mut resolver = SortResolver::new(&request, &config);

        let fields = resolver.sort_fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.field()).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[test]
    fn families_use_their_own_delimiter() {
        let mut request = RequestAdapter::new("req-delims");
        request.add_query_param("append", "a;b");
        request.add_query_param("sort", "a;b");
        let config = QueryConfig::new()
            .with_delimiter(QueryKind::Append, ";")
            .unwrap();

        let mut appends = AppendResolver::new(&request, &config);
        let mut sorts = SortResolver::new(&request, &config);

        assert_eq!(appends.requested_values().unwrap(), ["a", "b"]);
        assert_eq!(sorts.requested_values().unwrap(), ["a;b"]);
    }

    #[test]
    fn custom_parameter_names_are_honored() {
        struct Legacy;

        impl ParameterNames for Legacy {
            fn parameter_name(&self, kind: QueryKind) -> &str {
                match kind {
                    QueryKind::Append => "with",
                    other => other.as_str(),
                }
            }

            fn delimiter(&self, _kind: QueryKind) -> &str {
                " "
            }
        }

        let mut request = RequestAdapter::new("req-legacy");
        request.add_query_param("with", "profile roles");
        let mut resolver = AppendResolver::new(&request, &Legacy);

        assert_eq!(resolver.requested_values().unwrap(), ["profile", "roles"]);
    }

    #[test]
    fn delimiter_set_on_shared_config_applies_to_every_resolver() {
        let mut config = QueryConfig::default();
        config.set_delimiter(QueryKind::Append, ";").unwrap();

        let first_request = request("a;b;a");
        let second_request = request("c;d");

        let mut first = AppendResolver::new(&first_request, &config);
        let mut second = AppendResolver::new(&second_request, &config);

        assert_eq!(first.requested_values().unwrap(), ["a", "b"]);
        assert_eq!(second.requested_values().unwrap(), ["c", "d"]);
    }

    #[test]
    fn debug_output_names_the_family() {
        let request = request("a");
        let config = QueryConfig::default();
        let resolver = AppendResolver::new(&request, &config);

        let output = format!("{:?}", resolver);
        assert!(output.contains("Append"));
        assert!(output.contains("has_default_provider: false"));
    }
}
