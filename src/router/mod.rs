pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{DEFAULT_LOGIN_PATH, GuardDecision, NavigationGuard};
pub use navigator::{MAX_REDIRECTS, Navigation, Router};
pub use routes::{ComponentRef, RouteDescriptor, RouteEntry, RouteMatch, RouteTable};
