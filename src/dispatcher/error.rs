use crate::transport::TransportError;

/// Every way a dispatched call can fail. Display is the human-readable message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The round trip itself did not complete.
    #[error("{0}")]
    Transport(String),
    /// The request body could not be encoded.
    #[error("could not encode request body: {0}")]
    Encode(String),
    /// A successful response did not have the shape the caller asked for.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl RequestError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_))
    }
}

impl From<TransportError> for RequestError {
    fn from(e: TransportError) -> Self {
        RequestError::Transport(e.to_string())
    }
}
