//! SNS callback handling.
//!
//! Decode, check the origin, then either confirm the subscription or relay the
//! notification to Pub/Sub. The origin check runs before any outbound call, so
//! a rejected callback has no side effect.
//!
//! Callbacks are not deduplicated: SNS redelivering a notification produces a
//! second publish.

use std::sync::Arc;

use axum::http::Method;

use crate::error::RelayError;
use crate::pubsub::{Publisher, PubsubMessage};
use crate::sns::{CallbackKind, Confirmer, OriginGate, SnsEnvelope};

/// What a successful callback did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Subscription confirmed through this URL
    Confirmed { subscribe_url: String },
    /// Notification published with this Pub/Sub message id
    Published { message_id: String },
}

/// Shared, immutable relay state
pub struct Relay {
    origin: OriginGate,
    topic_name: String,
    publisher: Arc<dyn Publisher>,
    confirmer: Arc<dyn Confirmer>,
}

impl Relay {
    pub fn new(
        expected_topic_arn: impl Into<String>,
        topic_name: impl Into<String>,
        publisher: Arc<dyn Publisher>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            origin: OriginGate::new(expected_topic_arn),
            topic_name: topic_name.into(),
            publisher,
            confirmer,
        }
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// Handle one callback body received with `method`.
    ///
    /// The POST check lives inside each recognized branch, so an unknown type
    /// sent with another method is still a 400.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Result<Outcome, RelayError> {
        let envelope = SnsEnvelope::decode(body).map_err(RelayError::Decode)?;

        if !self.origin.accepts(&envelope.topic_arn) {
            return Err(RelayError::Origin(envelope.topic_arn));
        }

        match envelope.callback_kind() {
            CallbackKind::SubscriptionConfirmation => {
                require_post(method)?;
                self.confirm(envelope).await
            }
            CallbackKind::Notification => {
                require_post(method)?;
                self.relay(envelope).await
            }
            CallbackKind::Unrecognized => Err(RelayError::UnrecognizedKind(envelope.kind)),
        }
    }

    async fn confirm(&self, envelope: SnsEnvelope) -> Result<Outcome, RelayError> {
        self.confirmer.confirm(&envelope.subscribe_url).await?;

        tracing::info!("subscription confirmed through {}", envelope.subscribe_url);
        Ok(Outcome::Confirmed {
            subscribe_url: envelope.subscribe_url,
        })
    }

    async fn relay(&self, envelope: SnsEnvelope) -> Result<Outcome, RelayError> {
        tracing::debug!(sns_message_id = %envelope.message_id, "relaying notification");

        let message = PubsubMessage::from_envelope(&envelope);
        let message_id = self
            .publisher
            .publish(&self.topic_name, message)
            .await
            .map_err(|source| RelayError::Publish {
                topic: self.topic_name.clone(),
                source,
            })?;

        tracing::info!(
            sns_message_id = %envelope.message_id,
            "published message {} to topic {}",
            message_id,
            self.topic_name
        );
        Ok(Outcome::Published { message_id })
    }
}

fn require_post(method: &Method) -> Result<(), RelayError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(RelayError::MethodNotAllowed(method.to_string()))
    }
}
