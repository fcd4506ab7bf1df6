use reqwest::Method;

/// One outgoing call as handed to a transport. Each dispatch builds its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status plus the raw body text, read exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The call itself could not complete (unreachable host, timeout, broken body).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request to {path} timed out")]
    Timeout { path: String },
    #[error("could not reach {path}: {reason}")]
    Unreachable { path: String, reason: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("error reading response body: {0}")]
    Body(String),
}

/// A transport performs one HTTP-like round trip. It never retries.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    fn get_name(&self) -> &str;
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
