//! Error handling for the LiveMART purchase client
//!
//! Every failure maps onto a [`FailureCategory`] so the page can show the
//! retailer category-specific guidance.

use shared::{extract_error_detail, FailureCategory, PurchaseValidationError};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Validation errors, raised before any request is sent
    #[error(transparent)]
    Validation(#[from] PurchaseValidationError),

    #[error("A purchase is already being submitted")]
    SubmissionInProgress,

    // Transport errors
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ClientError {
    /// Build an HTTP error from a non-2xx status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Http {
            status,
            detail: extract_error_detail(status, body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message without the category framing
    pub fn detail(&self) -> String {
        match self {
            ClientError::Http { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                FailureCategory::Network
            }
            ClientError::Request(e) if e.is_request() && e.status().is_none() => {
                FailureCategory::Network
            }
            ClientError::Validation(_)
            | ClientError::SubmissionInProgress
            | ClientError::Decode(_)
            | ClientError::Configuration(_) => FailureCategory::Generic,
            other => FailureCategory::classify(other.status(), &other.detail()),
        }
    }

    /// What the retailer is told
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::SubmissionInProgress => self.to_string(),
            other => other.category().user_message(&other.detail()),
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
