use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::RequestError;
use super::message::failure_message;
use crate::session::SessionStore;
use crate::transport::{Transport, TransportRequest};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Header names callers may not override.
const PROTECTED_HEADERS: &[&str] = &[AUTHORIZATION, CONTENT_TYPE];

/// Per-call options for `Dispatcher::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().method(Method::POST)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes a typed payload as the body.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body).map_err(|e| RequestError::Encode(e.to_string()))?;
        Ok(self.body(value))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Single chokepoint for backend calls: injects the session token, encodes the
/// body, and collapses the response into a value or a `RequestError`.
///
/// Holds no per-call state, so concurrent dispatches never share an envelope.
pub struct Dispatcher {
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(session: Arc<SessionStore>, transport: Arc<dyn Transport>) -> Self {
        debug!("Creating dispatcher over '{}' transport", transport.get_name());
        Self { session, transport }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Issues one call and returns the decoded body: JSON when it parses, the raw
    /// text when it does not, and `Value::Null` for an empty body.
    pub async fn dispatch(&self, path: &str, options: RequestOptions) -> Result<Value, RequestError> {
        let request = self.build_request(path, options)?;
        let method = request.method.clone();

        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!("{} {} failed before a response arrived: {}", method, path, e);
                return Err(e.into());
            }
        };
        debug!("{} {} -> {}", method, path, response.status);

        let data = decode_body(&response.body);
        if !response.is_success() {
            let message = failure_message(response.status, &data);
            debug!("{} {} rejected: {}", method, path, message);
            return Err(RequestError::Status {
                status: response.status,
                message,
            });
        }
        Ok(data)
    }

    /// Like `dispatch`, then decodes the value into `T`.
    pub async fn dispatch_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        let value = self.dispatch(path, options).await?;
        serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> Result<TransportRequest, RequestError> {
        let token = self.session.get_token();
        let headers = merge_headers(&token, options.headers);

        let body = match options.body {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::to_string(&value).map_err(|e| RequestError::Encode(e.to_string()))?,
            ),
        };

        Ok(TransportRequest {
            method: options.method,
            path: path.to_string(),
            headers,
            body,
        })
    }
}

/// Computed headers first, then caller headers. A caller header replaces a
/// computed one of the same name unless that name is protected.
fn merge_headers(token: &str, caller: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())];
    if !token.is_empty() {
        headers.push((AUTHORIZATION.to_string(), format!("Bearer {}", token)));
    }

    for (name, value) in caller {
        if PROTECTED_HEADERS.iter().any(|p| p.eq_ignore_ascii_case(&name)) {
            warn!("Ignoring caller-supplied '{}' header", name);
            continue;
        }
        match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some(existing) => existing.1 = value,
            None => headers.push((name, value)),
        }
    }
    headers
}

fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
