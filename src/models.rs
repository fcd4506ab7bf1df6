pub mod auth;
pub mod work;

pub use auth::{LoginRequest, LoginResponse};
pub use work::{CreateRequest, Created, Decision, DecisionRequest, DecisionResult, RequestDetail};
