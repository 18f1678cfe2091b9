//! Error types for session handling, forms and file actions.

use filedeck_api_models::ErrorBody;
use thiserror::Error;

/// Failures while decoding or persisting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token did not contain a payload segment.
    #[error("malformed bearer token")]
    MalformedToken,
    /// Payload segment was not base64.
    #[error("token payload is not base64")]
    PayloadEncoding {
        /// Underlying decode error.
        #[source]
        source: base64::DecodeError,
    },
    /// Payload segment was not a JSON document.
    #[error("token payload is not JSON")]
    PayloadJson {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Token store could not be read or written.
    #[error("token store {operation} failed: {detail}")]
    Storage {
        /// Store operation that failed.
        operation: &'static str,
        /// Backend-specific failure description.
        detail: String,
    },
}

/// A required form field was left blank.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{field} is required")]
pub struct FormError {
    /// Name of the blank field.
    pub field: &'static str,
}

/// Failures of user-triggered file actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Upload was triggered without choosing a local file.
    #[error("no file chosen for upload")]
    NoFileChosen,
    /// Delete was triggered with an empty selection.
    #[error("no files selected")]
    NoFilesSelected,
    /// The session token carries no usable user id.
    #[error("session has no user id")]
    MissingUserId,
    /// The request failed in transport or returned a non-2xx status.
    #[error("request failed")]
    Request {
        /// HTTP status, `None` for transport failures.
        status: Option<u16>,
        /// Parsed error document, empty when the body was not JSON.
        body: ErrorBody,
    },
}

impl ActionError {
    /// Build a transport-level failure without a response.
    #[must_use]
    pub fn transport() -> Self {
        Self::Request {
            status: None,
            body: ErrorBody::default(),
        }
    }

    /// Build a failure from a non-2xx status and its raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::Request {
            status: Some(status),
            body: ErrorBody::from_slice(body),
        }
    }

    /// Whether the failure happened before any request was issued.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        !matches!(self, Self::Request { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_flagged() {
        assert!(ActionError::NoFileChosen.is_precondition());
        assert!(ActionError::NoFilesSelected.is_precondition());
        assert!(ActionError::MissingUserId.is_precondition());
        assert!(!ActionError::transport().is_precondition());
    }

    #[test]
    fn from_response_parses_body() {
        let err = ActionError::from_response(422, br#"{"message":"too large"}"#);
        let ActionError::Request { status, body } = err else {
            panic!("expected request error");
        };
        assert_eq!(status, Some(422));
        assert_eq!(body.message.as_deref(), Some("too large"));
    }

    #[test]
    fn form_error_names_field() {
        assert_eq!(FormError { field: "email" }.to_string(), "email is required");
    }
}
