//! Request-level errors and their HTTP mapping.
//!
//! Each variant corresponds to one way a callback can fail. The response body
//! is a fixed short diagnostic; details only go to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::pubsub::PublishError;
use crate::sns::{ConfirmError, DecodeError};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("error reading request: {0}")]
    UnreadableBody(String),

    #[error("invalid SNS message: {0}")]
    Decode(#[source] DecodeError),

    #[error("invalid SNS topic {0:?}")]
    Origin(String),

    #[error("unrecognized SNS message type {0:?}")]
    UnrecognizedKind(String),

    #[error("only POST method accepted, received {0}")]
    MethodNotAllowed(String),

    #[error("confirming subscription failed: {0}")]
    Handshake(#[from] ConfirmError),

    #[error("error publishing message in topic {topic}: {source}")]
    Publish {
        topic: String,
        #[source]
        source: PublishError,
    },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UnreadableBody(_) | RelayError::UnrecognizedKind(_) => StatusCode::BAD_REQUEST,
            RelayError::Decode(DecodeError::Syntax(_)) => StatusCode::BAD_REQUEST,
            RelayError::Decode(DecodeError::Shape(_)) => StatusCode::FORBIDDEN,
            RelayError::Origin(_) => StatusCode::FORBIDDEN,
            RelayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Handshake(_) | RelayError::Publish { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::UnreadableBody(_) => "error reading request",
            RelayError::Decode(_) => "invalid SNS message",
            RelayError::Origin(_) => "invalid SNS topic",
            RelayError::UnrecognizedKind(_) => "unrecognized SNS message type",
            RelayError::MethodNotAllowed(_) => "only POST method accepted",
            RelayError::Handshake(ConfirmError::Construct { .. }) => {
                "error creating request to confirm subscription"
            }
            RelayError::Handshake(ConfirmError::Transport { .. }) => {
                "an error occurred while confirming subscription"
            }
            RelayError::Handshake(ConfirmError::Status { .. }) => "confirming subscription failed",
            RelayError::Publish { .. } => "error publishing message",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(status = self.status().as_u16(), "{}", self);
        (self.status(), self.public_message()).into_response()
    }
}
