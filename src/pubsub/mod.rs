/// Google Cloud Pub/Sub (destination bus) integration module
///
/// Provides the message mapping and an SDK-backed client for publishing

pub mod message;
pub mod client;

pub use message::{PubsubMessage, ATTR_SNS_MESSAGE_ID, ATTR_SNS_SUBJECT};
pub use client::{ClientError, PublishError, Publisher, PubsubClient, Topic};
