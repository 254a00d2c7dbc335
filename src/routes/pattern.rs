//! Route matchers derived from the registered models.
//! Matching is set membership per path segment; an empty model set yields a
//! pattern that matches nothing.

use crate::model::{ModelDescriptor, ModelRegistry};
use std::collections::HashSet;

const SEARCH_PREFIX: &str = "/search/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// `/<slug>`
    Collection,
    /// `/search/<slug>[,<slug>...]`
    Search,
}

#[derive(Clone, Debug)]
pub struct RoutePattern {
    kind: RouteKind,
    slugs: Vec<String>,
    members: HashSet<String>,
}

impl RoutePattern {
    fn new(kind: RouteKind, models: &[ModelDescriptor]) -> Self {
        let slugs: Vec<String> = models.iter().map(|m| m.plural_slug.clone()).collect();
        let members = slugs.iter().cloned().collect();
        RoutePattern { kind, slugs, members }
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// Slugs in the order the pattern was built from.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Slugs addressed by `path`, or `None` when the path does not match.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        if self.members.is_empty() {
            return None;
        }
        match self.kind {
            RouteKind::Collection => {
                let segment = path.strip_prefix('/')?;
                self.members.contains(segment).then(|| vec![segment])
            }
            RouteKind::Search => {
                let list = path.strip_prefix(SEARCH_PREFIX)?;
                // a single trailing comma is tolerated
                let list = list.strip_suffix(',').unwrap_or(list);
                let slugs: Vec<&str> = list.split(',').collect();
                slugs.iter().all(|s| self.members.contains(*s)).then_some(slugs)
            }
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path).is_some()
    }

    /// Human-readable form for logs, e.g. `/search/{bills|votes}[,...]`.
    pub fn describe(&self) -> String {
        let alternatives = if self.slugs.is_empty() {
            "<none>".to_string()
        } else {
            format!("{{{}}}", self.slugs.join("|"))
        };
        match self.kind {
            RouteKind::Collection => format!("/{}", alternatives),
            RouteKind::Search => format!("{}{}[,...]", SEARCH_PREFIX, alternatives),
        }
    }
}

/// Matcher for `/<slug>` over the queryable models.
pub fn build_collection_route(queryable: &[ModelDescriptor]) -> RoutePattern {
    RoutePattern::new(RouteKind::Collection, queryable)
}

/// Matcher for `/search/<slug>,<slug>...` over the searchable models.
pub fn build_search_route(searchable: &[ModelDescriptor]) -> RoutePattern {
    RoutePattern::new(RouteKind::Search, searchable)
}

/// Where a request path is dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    Collection(String),
    Search(Vec<String>),
}

/// Both data routes, built once at startup.
#[derive(Clone, Debug)]
pub struct RouteTable {
    pub collection: RoutePattern,
    pub search: RoutePattern,
}

impl RouteTable {
    pub fn from_registry(registry: &ModelRegistry) -> Self {
        RouteTable {
            collection: build_collection_route(registry.queryable_models()),
            search: build_search_route(registry.searchable_models()),
        }
    }

    pub fn resolve(&self, path: &str) -> Option<RouteTarget> {
        if let Some(mut slugs) = self.collection.match_path(path) {
            return slugs.pop().map(|s| RouteTarget::Collection(s.to_string()));
        }
        self.search
            .match_path(path)
            .map(|slugs| RouteTarget::Search(slugs.into_iter().map(str::to_string).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(slug: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: slug.to_string(),
            source_id: slug.to_string(),
            plural_slug: slug.to_string(),
            is_queryable: true,
            is_searchable: true,
            fields: Vec::new(),
            basic_fields: Vec::new(),
            search_fields: Vec::new(),
        }
    }

    #[test]
    fn collection_route_is_anchored() {
        let route = build_collection_route(&[descriptor("bills"), descriptor("votes")]);
        assert!(route.is_match("/bills"));
        assert!(route.is_match("/votes"));
        for path in ["bills", "/bills/", "/bills/1", "//bills", "/billsx", "/xbills", "/", "", "/bills,votes"] {
            assert!(!route.is_match(path), "{path:?} should not match");
        }
    }

    #[test]
    fn search_route_accepts_lists_and_repetition() {
        let route = build_search_route(&[descriptor("bills"), descriptor("votes")]);
        assert_eq!(route.match_path("/search/bills"), Some(vec!["bills"]));
        assert_eq!(route.match_path("/search/votes,bills"), Some(vec!["votes", "bills"]));
        assert_eq!(route.match_path("/search/bills,bills"), Some(vec!["bills", "bills"]));
        assert_eq!(route.match_path("/search/bills,"), Some(vec!["bills"]));
        for path in ["/search/", "/search/,", "/search/bills,,votes", "/search/billsvotes", "/search/bills/1", "/bills", "/search"] {
            assert!(!route.is_match(path), "{path:?} should not match");
        }
    }

    #[test]
    fn empty_sets_match_nothing() {
        let collection = build_collection_route(&[]);
        let search = build_search_route(&[]);
        for path in ["/", "/search/", "/search/,", "/bills", "/search/bills", "", "/,"] {
            assert!(!collection.is_match(path));
            assert!(!search.is_match(path));
        }
        assert_eq!(collection.kind(), RouteKind::Collection);
        assert_eq!(collection.describe(), "/<none>");
    }

    #[test]
    fn describe_lists_slugs_in_build_order() {
        let route = build_search_route(&[descriptor("bills"), descriptor("votes")]);
        assert_eq!(route.kind(), RouteKind::Search);
        assert_eq!(route.describe(), "/search/{bills|votes}[,...]");
        assert_eq!(route.slugs(), ["bills", "votes"]);
    }
}
