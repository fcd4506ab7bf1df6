use std::sync::Arc;

use tracing::debug;

use super::routes::RouteDescriptor;
use crate::session::SessionStore;

pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Decides, before a view mounts, whether the destination may be shown.
///
/// Reads the session only; never redirects or mutates anything itself.
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    login_path: String,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_login_path(session, DEFAULT_LOGIN_PATH)
    }

    pub fn with_login_path(session: Arc<SessionStore>, login_path: impl Into<String>) -> Self {
        Self {
            session,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn guard(&self, target: &RouteDescriptor) -> GuardDecision {
        if target.requires_auth && !self.session.is_authenticated() {
            debug!(
                "'{}' requires auth and no session exists; redirecting to '{}'",
                target.path, self.login_path
            );
            return GuardDecision::Redirect(self.login_path.clone());
        }
        GuardDecision::Allow
    }
}
