//! # sns-pubsub-relay
//!
//! HTTP endpoint that receives Amazon SNS callbacks and republishes them to a
//! Google Cloud Pub/Sub topic, so consumers that only read Pub/Sub can receive
//! SNS fan-out.
//!
//! ## Flow
//!
//! 1. Decode the callback body into an [`SnsEnvelope`]
//! 2. Reject callbacks whose `TopicArn` is not the configured one (403)
//! 3. `SubscriptionConfirmation`: GET the `SubscribeURL`, succeed on 200
//! 4. `Notification`: publish `Message` to Pub/Sub with `snsMessageId` and
//!    `snsSubject` attributes and wait for the assigned message id
//!
//! There is no retry, persistence or deduplication; SNS redelivery covers
//! transient failures.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sns_pubsub_relay::{router, HttpConfirmer, PubsubClient, Relay};
//!
//! let client = PubsubClient::new("my-project").await?;
//! let relay = Relay::new(
//!     "arn:aws:sns:us-east-1:123456789012:events",
//!     "events-in",
//!     Arc::new(client),
//!     Arc::new(HttpConfirmer::default()),
//! );
//! let app = router(Arc::new(relay), "/", 1024 * 1024);
//! ```

pub mod config;
pub mod error;
pub mod sns;
pub mod pubsub;
pub mod relay;
pub mod server;

// Re-export key types
pub use config::RelayConfig;
pub use error::RelayError;
pub use sns::{CallbackKind, ConfirmError, Confirmer, HttpConfirmer, OriginGate, SnsEnvelope};
pub use pubsub::{PublishError, Publisher, PubsubClient, PubsubMessage};
pub use relay::{Outcome, Relay};
pub use server::{router, AppState};
