use std::collections::BTreeMap;

/// Names the view a route renders. Rendering itself happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef(pub &'static str);

pub const LOGIN_VIEW: ComponentRef = ComponentRef("Login");
pub const REQUESTS_VIEW: ComponentRef = ComponentRef("Requests");
pub const REQUEST_DETAIL_VIEW: ComponentRef = ComponentRef("RequestDetail");

/// A renderable route. `path` may contain `:name` parameter segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub component: ComponentRef,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            path: path.into(),
            component,
            requires_auth: false,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    Route(RouteDescriptor),
    /// A permanent redirect from one exact path to another.
    Redirect { from: String, to: String },
}

impl RouteEntry {
    fn pattern(&self) -> &str {
        match self {
            RouteEntry::Route(route) => &route.path,
            RouteEntry::Redirect { from, .. } => from,
        }
    }
}

/// The outcome of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    Route {
        route: &'a RouteDescriptor,
        params: BTreeMap<String, String>,
    },
    Redirect(&'a str),
}

/// Ordered, immutable route list. The first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// The approval-ops views: listing and detail are open to guests, `/` goes to the listing.
    pub fn default_table() -> Self {
        Self::new(vec![
            RouteEntry::Redirect {
                from: "/".to_string(),
                to: "/requests".to_string(),
            },
            RouteEntry::Route(RouteDescriptor::new("/login", LOGIN_VIEW)),
            RouteEntry::Route(RouteDescriptor::new("/requests", REQUESTS_VIEW)),
            RouteEntry::Route(RouteDescriptor::new("/requests/:id", REQUEST_DETAIL_VIEW)),
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = strip_query(path);
        self.entries.iter().find_map(|entry| {
            let params = match_pattern(entry.pattern(), path)?;
            Some(match entry {
                RouteEntry::Route(route) => RouteMatch::Route { route, params },
                RouteEntry::Redirect { to, .. } => RouteMatch::Redirect(to),
            })
        })
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns the captured parameters when `path` matches `pattern` segment for segment.
fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let expected = segments(pattern);
    let actual = segments(path);
    if expected.len() != actual.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (want, got) in expected.iter().zip(actual) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), got.to_string());
            }
            None if *want == got => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_listing() {
        let table = RouteTable::default_table();
        assert_eq!(table.resolve("/"), Some(RouteMatch::Redirect("/requests")));
    }

    #[test]
    fn test_detail_route_captures_id() {
        let table = RouteTable::default_table();
        match table.resolve("/requests/42?tab=audit") {
            Some(RouteMatch::Route { route, params }) => {
                assert_eq!(route.component, REQUEST_DETAIL_VIEW);
                assert_eq!(params.get("id").map(String::as_str), Some("42"));
            }
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_slash_matches() {
        let table = RouteTable::default_table();
        assert!(matches!(
            table.resolve("/requests/"),
            Some(RouteMatch::Route { route, .. }) if route.component == REQUESTS_VIEW
        ));
    }

    #[test]
    fn test_unknown_path_has_no_match() {
        let table = RouteTable::default_table();
        assert_eq!(table.resolve("/requests/1/extra"), None);
        assert_eq!(table.resolve("/nowhere"), None);
    }

    #[test]
    fn test_default_table_is_open_to_guests() {
        let table = RouteTable::default_table();
        let guarded = table.entries().iter().any(|entry| {
            matches!(entry, RouteEntry::Route(route) if route.requires_auth)
        });
        assert!(!guarded);
    }
}
