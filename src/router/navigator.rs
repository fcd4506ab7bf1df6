use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::guard::{GuardDecision, NavigationGuard};
use super::routes::{RouteDescriptor, RouteMatch, RouteTable};

/// Upper bound on redirects followed for a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The guard allowed `route`; `path` is where navigation ended after `redirects`.
    Render {
        path: String,
        route: RouteDescriptor,
        params: BTreeMap<String, String>,
        redirects: Vec<String>,
    },
    NotFound { path: String },
    RedirectLoop { path: String },
}

/// Resolves paths against the route table and consults the guard before every render.
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
}

impl Router {
    pub fn new(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let mut current = path.to_string();
        let mut redirects = Vec::new();

        loop {
            if redirects.len() > MAX_REDIRECTS {
                warn!("Too many redirects while navigating to '{}'", path);
                return Navigation::RedirectLoop {
                    path: path.to_string(),
                };
            }

            let next = match self.table.resolve(&current) {
                None => {
                    debug!("No route matches '{}'", current);
                    return Navigation::NotFound { path: current };
                }
                Some(RouteMatch::Redirect(to)) => to.to_string(),
                Some(RouteMatch::Route { route, params }) => match self.guard.guard(route) {
                    GuardDecision::Allow => {
                        return Navigation::Render {
                            path: current,
                            route: route.clone(),
                            params,
                            redirects,
                        };
                    }
                    GuardDecision::Redirect(to) => to,
                },
            };
            debug!("Redirecting '{}' -> '{}'", current, next);
            redirects.push(current);
            current = next;
        }
    }
}
