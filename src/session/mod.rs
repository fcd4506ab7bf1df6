pub mod session;

pub use session::{AuthUpdate, GUEST_USERNAME, SessionStore, TOKEN_KEY, USERNAME_KEY};
