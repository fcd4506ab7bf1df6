pub mod base;
pub mod http_transport;
#[cfg(any(test, feature = "test-util"))]
pub mod stub_transport;

pub use base::{Transport, TransportError, TransportRequest, TransportResponse};
pub use http_transport::HttpTransport;
#[cfg(any(test, feature = "test-util"))]
pub use stub_transport::StubTransport;
