//! Client initialization.
//!
//! Wires configuration into storage, session, transport, dispatcher, API and
//! router, in that order.

use std::sync::Arc;
use tracing::info;

use crate::api::WorkApi;
use crate::config::ConfigV1;
use crate::dispatcher::Dispatcher;
use crate::router::{NavigationGuard, RouteTable, Router};
use crate::session::SessionStore;
use crate::state::AppState;
use crate::storage::create_storage;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Builds the client over an HTTP transport for `config.api`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build(config: Arc<ConfigV1>) -> Result<AppState, TransportError> {
    let transport = Arc::new(HttpTransport::new(&config.api)?);
    Ok(build_with_transport(config, transport))
}

/// Builds the client over any transport, e.g. a stub in tests.
pub fn build_with_transport(config: Arc<ConfigV1>, transport: Arc<dyn Transport>) -> AppState {
    let storage = create_storage(&config.storage);
    let session = Arc::new(SessionStore::new(storage));
    let dispatcher = Arc::new(Dispatcher::new(session.clone(), transport));
    let api = Arc::new(WorkApi::new(dispatcher.clone()));
    let guard = NavigationGuard::with_login_path(session.clone(), &config.navigation.login_path);
    let router = Arc::new(Router::new(RouteTable::default_table(), guard));

    info!(
        "Client ready for '{}' (session user '{}')",
        config.api.base_url,
        session.get_username()
    );

    AppState {
        config,
        session,
        dispatcher,
        api,
        router,
    }
}
