//! TRA client error types.

use crate::timetable::ExtractError;

/// Errors from fetching and parsing a TRA transfer query.
#[derive(Debug, thiserror::Error)]
pub enum TraError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The TRA site answered with a non-success status.
    #[error("TRA server returned {status}")]
    Upstream { status: u16, body: String },

    /// The result page did not have the expected shape.
    #[error("failed to parse HTML response: {0}")]
    Parse(#[from] ExtractError),

    /// The client could not be built from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl TraError {
    /// Upstream status code, when the failure came from the TRA server.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            TraError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TraError::Upstream {
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "TRA server returned 503");
        assert_eq!(err.upstream_status(), Some(503));

        let err = TraError::Parse(ExtractError::TableNotFound {
            class: "itinerary-controls",
        });
        assert!(err.to_string().starts_with("failed to parse HTML response"));
        assert_eq!(err.upstream_status(), None);
    }
}
