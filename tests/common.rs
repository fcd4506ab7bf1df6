#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use aoa_client::config::{ConfigV1, parse_config};
use aoa_client::startup::build_with_transport;
use aoa_client::state::AppState;
use aoa_client::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// Config with file storage under `dir` and the given backend URL.
pub fn test_config(dir: &Path, base_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{base_url}"
  timeout_in_ms: 3000
storage:
  type: "file"
  path: "{}"
navigation:
  login_path: "/login"
logging:
  level: "debug"
  format: "json"
"#,
        dir.join("session.json").display()
    );
    parse_config(&yaml).expect("test config should parse")
}

pub fn build_client(config: ConfigV1, transport: Arc<dyn Transport>) -> AppState {
    build_with_transport(Arc::new(config), transport)
}

/// Replays queued `(status, body)` pairs and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<(u16, String)>>,
    sent: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    pub fn last_sent(&self) -> Option<TransportRequest> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    fn get_name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let path = request.path.clone();
        self.sent.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some((status, body)) => Ok(TransportResponse { status, body }),
            None => Err(TransportError::Unreachable {
                path,
                reason: "no scripted reply left".to_string(),
            }),
        }
    }
}
