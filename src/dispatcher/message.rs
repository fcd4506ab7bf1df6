//! Failure message extraction for error responses.
//!
//! The decoded body of a failed response is offered to each strategy in order;
//! the first one that yields a non-empty message wins. When none does, the
//! message is `HTTP <status>`.

use serde_json::Value;

type Strategy = fn(&Value) -> Option<String>;

const STRATEGIES: &[Strategy] = &[plain_text, message_field, error_field];

/// A body that is itself a string is used verbatim, even when empty.
fn plain_text(body: &Value) -> Option<String> {
    body.as_str().map(str::to_string)
}

fn message_field(body: &Value) -> Option<String> {
    field(body, "message")
}

fn error_field(body: &Value) -> Option<String> {
    field(body, "error")
}

/// Falsy values (null, false, 0, "") do not count as a hit.
fn field(body: &Value, name: &str) -> Option<String> {
    match body.as_object()?.get(name)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

pub fn failure_message(status: u16, body: &Value) -> String {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(body))
        .unwrap_or_else(|| format!("HTTP {}", status))
}
