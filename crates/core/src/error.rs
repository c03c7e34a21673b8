use meditrack_types::{IdError, RoleError, SlotTimeError, TextError};

/// Fallback shown when the server rejects a request without saying why.
pub const GENERIC_REJECTION_MESSAGE: &str = "Error booking appointment. Please try again.";

/// Shown for every transport failure.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Could not reach the Medi-Track service. Check your connection and try again.";

/// Shown for server errors and unreadable responses.
pub const SERVICE_FAILURE_MESSAGE: &str =
    "The Medi-Track service could not complete the request. Please try again.";

/// Typed failure of a single gateway call.
///
/// Every gateway operation settles into either its success payload or one of these; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(Box<dyn std::error::Error + Send + Sync>),
    #[error("request rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Validation {
        status: u16,
        message: Option<String>,
    },
    #[error("not authorised ({status})")]
    Unauthorized { status: u16 },
    #[error("server error ({status})")]
    Server { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl GatewayError {
    /// The text a view shows in its dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Network(_) => NETWORK_FAILURE_MESSAGE.to_owned(),
            GatewayError::Validation {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            GatewayError::Validation { .. } => GENERIC_REJECTION_MESSAGE.to_owned(),
            GatewayError::Unauthorized { .. } => {
                "Your session is no longer valid. Please log in again.".to_owned()
            }
            GatewayError::Server { .. } | GatewayError::Decode(_) => SERVICE_FAILURE_MESSAGE.to_owned(),
        }
    }

    /// Whether the caller should drop the session (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Role(#[from] RoleError),
    #[error(transparent)]
    SlotTime(#[from] SlotTimeError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Transition(#[from] crate::booking::TransitionError),
    #[error("failed to create session directory: {0}")]
    SessionDirCreation(std::io::Error),
    #[error("failed to read session file: {0}")]
    SessionRead(std::io::Error),
    #[error("failed to write session file: {0}")]
    SessionWrite(std::io::Error),
    #[error("failed to serialize session: {0}")]
    SessionSerialization(serde_json::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_surfaced_verbatim() {
        let err = GatewayError::Validation {
            status: 409,
            message: Some("Slot already booked".into()),
        };
        assert_eq!(err.user_message(), "Slot already booked");
    }

    #[test]
    fn test_validation_without_message_uses_fallback() {
        let err = GatewayError::Validation {
            status: 400,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_REJECTION_MESSAGE);

        let blank = GatewayError::Validation {
            status: 400,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_REJECTION_MESSAGE);
    }

    #[test]
    fn test_network_error_prompts_retry() {
        let err = GatewayError::Network("connection refused".into());
        assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
        assert!(!err.is_unauthorized());
    }
}
