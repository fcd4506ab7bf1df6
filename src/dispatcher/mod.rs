pub mod dispatcher;
pub mod error;
pub mod message;

pub use dispatcher::{Dispatcher, RequestOptions};
pub use error::RequestError;
