//! Route access decisions against the menu tree.
//!
//! Every requested path is normalized under the application root (`/main`)
//! before it is compared to submenu routes. Routes are compiled once into a
//! [`RouteTable`] when a tree is installed so page transitions only pay for
//! string comparisons and, for parametrized routes, a single regex match.

use crate::menu::MenuTree;
use regex::Regex;

/// Root dashboard path; always reachable by an authenticated user.
pub const ROOT_PATH: &str = "/main";

/// Normalizes a requested path under [`ROOT_PATH`]. Idempotent.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with(ROOT_PATH) {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{ROOT_PATH}{path}")
    } else {
        format!("{ROOT_PATH}/{path}")
    }
}

fn strip_root(path: &str) -> &str {
    path.strip_prefix(ROOT_PATH).unwrap_or(path)
}

fn is_same_or_descendant(path: &str, route: &str) -> bool {
    path == route
        || path
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// A submenu route compiled for matching.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    route: String,
    wildcard: Option<Regex>,
}

impl RoutePattern {
    /// Compiles a route. Returns `None` for blank routes, which grant nothing.
    #[must_use]
    pub fn compile(raw: &str) -> Option<Self> {
        let route = raw.trim();
        if route.is_empty() {
            return None;
        }
        Some(Self {
            route: route.to_string(),
            wildcard: compile_wildcard(route),
        })
    }

    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[must_use]
    pub fn is_parametrized(&self) -> bool {
        self.wildcard.is_some()
    }

    /// Tests an already-normalized path.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        if is_same_or_descendant(normalized, &self.route) {
            return true;
        }

        if self
            .wildcard
            .as_ref()
            .is_some_and(|regex| regex.is_match(normalized))
        {
            return true;
        }

        // backend records stored without the root prefix
        is_same_or_descendant(strip_root(normalized), strip_root(&self.route))
    }
}

/// `:name` segments match exactly one path segment; the route may be followed
/// by any sub-path.
fn compile_wildcard(route: &str) -> Option<Regex> {
    if !route.split('/').any(|segment| segment.starts_with(':')) {
        return None;
    }

    let body = route
        .split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                "[^/]+".to_string()
            } else {
                regex::escape(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    Regex::new(&format!("^{body}(/.*)?$")).ok()
}

/// Compiled routes of one menu tree snapshot.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    patterns: Vec<RoutePattern>,
}

impl RouteTable {
    #[must_use]
    pub fn from_tree(tree: &MenuTree) -> Self {
        let patterns = tree
            .iter()
            .flat_map(|menu| menu.submenus.iter())
            .filter_map(|submenu| RoutePattern::compile(&submenu.route))
            .collect();
        Self { patterns }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn has_access(&self, requested: &str) -> bool {
        let normalized = normalize_path(requested);
        if normalized == ROOT_PATH {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(&normalized))
    }
}

/// One-shot access check; compiles the tree on every call. The menu store
/// keeps a [`RouteTable`] instead.
#[must_use]
pub fn has_access(requested: &str, tree: &MenuTree) -> bool {
    RouteTable::from_tree(tree).has_access(requested)
}

/// Every submenu route in tree order, untrimmed.
#[must_use]
pub fn all_routes(tree: &MenuTree) -> Vec<String> {
    tree.iter()
        .flat_map(|menu| menu.submenus.iter())
        .map(|submenu| submenu.route.clone())
        .collect()
}
