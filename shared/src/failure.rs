//! Classification of failed purchase submissions
//!
//! A failed request is mapped onto a small set of categories, each with its
//! own guidance for the retailer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What went wrong with a submission, as far as the user is concerned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// The order service rejected the HTTP method (405)
    MethodNotAllowed,
    /// The request was blocked by a cross-origin policy
    CrossOrigin,
    /// The order service could not be reached
    Network,
    Generic,
}

impl FailureCategory {
    /// Classify from the HTTP status (if a response arrived) and the error text
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        if status == Some(405) {
            return FailureCategory::MethodNotAllowed;
        }

        let lower = message.to_lowercase();
        let method_rejected = lower.contains("method not allowed")
            || (status.is_none() && mentions_status_405(&lower));
        if method_rejected {
            FailureCategory::MethodNotAllowed
        } else if lower.contains("cors") || lower.contains("cross-origin") {
            FailureCategory::CrossOrigin
        } else if status.is_none()
            && (lower.contains("network")
                || lower.contains("failed to fetch")
                || lower.contains("connection")
                || lower.contains("timed out"))
        {
            FailureCategory::Network
        } else {
            FailureCategory::Generic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::MethodNotAllowed => "method_not_allowed",
            FailureCategory::CrossOrigin => "cross_origin",
            FailureCategory::Network => "network",
            FailureCategory::Generic => "generic",
        }
    }

    /// Message shown to the retailer; `detail` is only used by `Generic`
    pub fn user_message(&self, detail: &str) -> String {
        match self {
            FailureCategory::MethodNotAllowed => {
                "The order service does not accept this request method (405 Method Not Allowed). \
                 The purchase endpoint may be missing or misrouted on the backend; \
                 please contact the administrator."
                    .to_string()
            }
            FailureCategory::CrossOrigin => {
                "The request was blocked by the order service's cross-origin (CORS) policy. \
                 Make sure the backend allows requests from this site."
                    .to_string()
            }
            FailureCategory::Network => {
                "Could not reach the order service. Check your connection and that the \
                 backend is running, then try again."
                    .to_string()
            }
            FailureCategory::Generic => format!("Purchase failed: {}", detail),
        }
    }
}

/// A bare 405 only counts when it reads as a status code, never as a count
fn mentions_status_405(lower: &str) -> bool {
    ["http 405", "status 405", "code 405", "405 method"]
        .iter()
        .any(|pattern| lower.contains(pattern))
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pull a readable message out of an error response body.
///
/// Understands `{"detail": "..."}`, FastAPI validation errors
/// (`{"detail": [{"msg": "..."}]}`) and `{"message": "..."}`; anything else
/// falls back to the raw text, or to the status line when the body is empty.
pub fn extract_error_detail(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {}", status);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => detail_from_json(&value).unwrap_or_else(|| trimmed.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

fn detail_from_json(value: &Value) -> Option<String> {
    let detail = value.get("detail").or_else(|| value.get("message"))?;
    match detail {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| match item.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => item.to_string(),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
