//! Reserved control parameters ("magic fields") and request parameter partitioning.
//!
//! A request parameter whose root name is magic controls the API (paging, field
//! selection, output format, jsonp). Everything else is a filter on a model field,
//! which is why no model may declare a field with one of these names.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

/// Every reserved control-parameter name.
pub const MAGIC_FIELDS: [&str; 17] = [
    "fields",
    "order",
    "sort",
    "page",
    "per_page",
    // query.fields
    "query",
    "search",
    // citing.details
    "citing",
    "citation",
    "citation_details",
    "explain",
    // xml output
    "format",
    "apikey",
    // jsonp; `_` is the cache buster
    "callback",
    "_",
    // router keywords
    "captures",
    "splat",
];

static MAGIC_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| MAGIC_FIELDS.into_iter().collect());

/// Exact, case-sensitive membership test.
pub fn is_magic(name: &str) -> bool {
    MAGIC_SET.contains(name)
}

/// Top-level name of a parameter or field: `citing.details` -> `citing`, `page__gte` -> `page`.
pub fn root_name(name: &str) -> &str {
    let top = name.split('.').next().unwrap_or(name);
    match top.find("__") {
        Some(idx) if idx > 0 => &top[..idx],
        _ => top,
    }
}

/// Request parameters split into the control and data-filter namespaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Control parameters by full name; a repeated name keeps the last value.
    pub control: BTreeMap<String, String>,
    /// Filters in request order, passed through to the engines untouched.
    pub filters: Vec<(String, String)>,
}

impl RequestParams {
    pub fn partition<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = RequestParams::default();
        for (k, v) in pairs {
            if is_magic(root_name(&k)) {
                params.control.insert(k, v);
            } else {
                params.filters.push((k, v));
            }
        }
        params
    }

    pub fn control(&self, name: &str) -> Option<&str> {
        self.control.get(name).map(String::as_str)
    }
}
