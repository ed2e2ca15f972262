//! Error type for the PlateMate API client.
//!
//! # Design
//! Every failure path in the request pipeline converges on `ApiError`. The
//! three variants keep the distinct causes inspectable (network, HTTP status,
//! backend-reported), but callers that only want a human-readable message can
//! keep using `Display` without matching on the variant.

use thiserror::Error;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The exchange failed before a valid JSON response was received:
    /// connection refused, DNS failure, interrupted transfer, or a body that
    /// did not carry the expected envelope.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. The body is not consulted;
    /// the status code is the whole story.
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// The server answered 2xx but the envelope carried an `error` field.
    /// The message is the backend's own wording, passed through verbatim.
    #[error("{0}")]
    Application(String),
}

impl ApiError {
    /// The HTTP status code, present only when one was observed on the wire.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            ApiError::Network(_) | ApiError::Application(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_display_names_the_origin() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn http_error_carries_the_status() {
        let err = ApiError::Http { status: 503 };
        assert_eq!(err.to_string(), "HTTP error: status 503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn application_error_is_the_backend_message_verbatim() {
        let err = ApiError::Application("email taken".to_string());
        assert_eq!(err.to_string(), "email taken");
        assert_eq!(err.status(), None);
    }
}
