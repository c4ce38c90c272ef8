use thiserror::Error;

/// Why a completion could not be relayed.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The provider answered with a non-success status.
    /// `message` is the provider's own error message, when it sent one.
    #[error("completion API returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    /// The request never got a response (connection, TLS, timeout...).
    #[error("completion API unreachable: {0}")]
    Transport(String),

    /// A success status came back with a body that is not JSON.
    #[error("completion API sent an invalid body: {0}")]
    InvalidResponse(String),

    /// The task running the request went away without answering.
    #[error("completion task ended without a result")]
    Canceled,
}

impl CompletionError {
    /// Status code reported by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error message, if any.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            CompletionError::Upstream { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_exposes_status_and_message() {
        let err = CompletionError::Upstream {
            status: 429,
            message: Some("Rate limit reached".to_string()),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.upstream_message(), Some("Rate limit reached"));
        assert_eq!(
            err.to_string(),
            "completion API returned 429: Rate limit reached"
        );
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = CompletionError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.upstream_message(), None);
    }
}
