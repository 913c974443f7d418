use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Every way a GitHub call can fail.
///
/// The set is closed: each failed request maps to exactly one variant, and
/// callers are expected to `match` all of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("rate_limit: resets at {reset_at}")]
    RateLimit { reset_at: DateTime<Utc> },

    #[error("bad_auth: {message}")]
    BadAuth { message: String },

    #[error("not_found: {message}")]
    NotFound { message: String },

    #[error("validation: {message}")]
    Validation { message: String },

    #[error("server_error: {message}")]
    ServerError { message: String },

    #[error("network_error: {message}")]
    NetworkError { message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Stable snake_case name of the variant, as shown to users.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::RateLimit { .. } => "rate_limit",
            ApiError::BadAuth { .. } => "bad_auth",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Validation { .. } => "validation",
            ApiError::ServerError { .. } => "server_error",
            ApiError::NetworkError { .. } => "network_error",
        }
    }

    /// The human readable detail, if the variant carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::RateLimit { .. } => None,
            ApiError::BadAuth { message }
            | ApiError::NotFound { message }
            | ApiError::Validation { message }
            | ApiError::ServerError { message }
            | ApiError::NetworkError { message } => Some(message),
        }
    }

    /// Failure that happened before any response arrived (DNS, refused
    /// connection, timeout) or while decoding a successful body.
    ///
    /// The message carries the whole `source()` chain, since the top-level
    /// text of a transport error rarely names the cause.
    pub fn network<E: std::error::Error>(err: E) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !text.is_empty() && !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }

        ApiError::NetworkError { message }
    }

    /// Turn a non-2xx response into its error variant.
    ///
    /// The message prefers the first structured entry of the body's `errors`
    /// array, then the body's top-level `message`, then `HTTP <status>`.
    pub fn classify(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
        let message = error_message(status, body);

        match status.as_u16() {
            401 => ApiError::BadAuth { message },
            403 => {
                if header_str(headers, RATE_LIMIT_REMAINING) == Some("0") {
                    ApiError::RateLimit {
                        reset_at: reset_time(headers),
                    }
                } else {
                    ApiError::BadAuth { message }
                }
            }
            404 => ApiError::NotFound { message },
            422 => ApiError::Validation { message },
            code if code >= 500 => ApiError::ServerError { message },
            _ => ApiError::NetworkError { message },
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

/// Absolute reset instant from the epoch-seconds header. A missing or garbled
/// header means "now": the caller can retry as soon as it likes.
fn reset_time(headers: &HeaderMap) -> DateTime<Utc> {
    header_str(headers, RATE_LIMIT_RESET)
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    parsed
        .as_ref()
        .and_then(field_error_message)
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

// GitHub sends `errors` either as objects with a `message` or as bare strings
fn field_error_message(body: &Value) -> Option<String> {
    body.get("errors")?
        .as_array()?
        .iter()
        .find_map(|entry| match entry {
            Value::String(text) => Some(text.as_str()),
            other => other.get("message").and_then(Value::as_str),
        })
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
