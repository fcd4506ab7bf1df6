//! Shared client state.
//!
//! Holds the session context and the components built on top of it. The
//! dispatcher and the guard receive the same `SessionStore`, so a login through
//! the API is immediately visible to navigation.

use crate::api::WorkApi;
use crate::config::ConfigV1;
use crate::dispatcher::Dispatcher;
use crate::router::Router;
use crate::session::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The one session context for this process.
    pub session: Arc<SessionStore>,
    /// Every backend call goes through here.
    pub dispatcher: Arc<Dispatcher>,
    pub api: Arc<WorkApi>,
    /// Route table plus navigation guard.
    pub router: Arc<Router>,
}
