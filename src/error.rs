//! Error taxonomy for menu loading.
//!
//! Route matching and profile normalization never fail; they degrade to "no
//! access" or an absent field. Only the fetch path produces a `MenuError`, and
//! the menu store decides which of them are shown to the user.

use thiserror::Error;

/// Maximum number of error body characters surfaced to the UI.
pub const MAX_ERROR_CHARS: usize = 200;

/// Message carried by a 401 from the menus endpoint.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Please login again";

/// Fallback for a non-success envelope that carries no message.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch menus";

/// Fallback used by the store when an error yields an empty message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load menus";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Backend unreachable or the connection dropped.
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    /// Session no longer valid; teardown belongs to the auth layer.
    #[error("Unauthorized: Please login again")]
    Unauthorized,
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    /// The envelope came back with a status other than `success`.
    #[error("{0}")]
    Domain(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Config error: {0}")]
    Config(String),
    /// Role or organization could not be resolved from the profile. Never
    /// returned from a fetch; only logged before the request goes out.
    #[error("Profile is missing role_id ({role_id}) or org_type ({org_type})")]
    MalformedProfile { role_id: String, org_type: String },
}

impl MenuError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message suitable for the sidebar error placeholder.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Domain(message) | Self::Http { message, .. } => message.trim().to_string(),
            other => other.to_string(),
        };
        if message.is_empty() {
            LOAD_FAILED_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Trims and truncates an HTTP error body for display.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_body_handles_blank_and_long_bodies() {
        assert_eq!(sanitize_body("   \n"), "Request failed.");
        assert_eq!(sanitize_body("  boom  "), "boom");
        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(&long).chars().count(), MAX_ERROR_CHARS);
    }

    #[test]
    fn user_message_prefers_backend_text() {
        let err = MenuError::Domain("Role not mapped".to_string());
        assert_eq!(err.user_message(), "Role not mapped");

        let err = MenuError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.user_message(), "Internal Server Error");
    }

    #[test]
    fn user_message_falls_back_when_empty() {
        assert_eq!(
            MenuError::Domain("  ".to_string()).user_message(),
            LOAD_FAILED_MESSAGE
        );
    }

    #[test]
    fn unauthorized_is_distinct() {
        assert!(MenuError::Unauthorized.is_unauthorized());
        assert!(!MenuError::Transport("down".to_string()).is_unauthorized());
        assert_eq!(MenuError::Unauthorized.to_string(), UNAUTHORIZED_MESSAGE);
    }
}
