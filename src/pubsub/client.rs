/// Google Cloud Pub/Sub client for message publishing
///
/// Wraps the `gcloud-pubsub` SDK. One client is built at startup and shared by
/// every request; it owns the gRPC connections, the credentials and one
/// publisher per destination topic.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use gcloud_pubsub::client::{Client, ClientConfig};
use gcloud_pubsub::publisher::Publisher as SdkPublisher;

use crate::pubsub::message::PubsubMessage;

/// Failure to build the client (fatal at startup)
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("GCP project id is empty")]
    MissingProject,

    #[error("failed to load Application Default Credentials: {0}")]
    Auth(String),

    #[error("failed to create Pub/Sub client: {0}")]
    Connect(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Pub/Sub refused or failed the publish (transport, auth, unknown topic, quota)
    #[error("publish to {topic} failed: {status}")]
    Rejected { topic: String, status: String },
}

/// Destination bus seam used by the relay
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one message to `topic` and wait for the assigned message id
    async fn publish(&self, topic: &str, message: PubsubMessage) -> Result<String, PublishError>;
}

pub struct PubsubClient {
    client: Client,
    publishers: RwLock<HashMap<String, SdkPublisher>>,
}

impl PubsubClient {
    /// Connect to Pub/Sub for `project_id`.
    ///
    /// Uses the emulator when `PUBSUB_EMULATOR_HOST` is set, Application
    /// Default Credentials otherwise.
    pub async fn new(project_id: &str) -> Result<Self, ClientError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(ClientError::MissingProject);
        }

        let config = ClientConfig {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        };

        let config = match std::env::var("PUBSUB_EMULATOR_HOST") {
            Ok(host) if !host.is_empty() => {
                tracing::info!("Using Pub/Sub emulator at {}", host);
                config
            }
            _ => config
                .with_auth()
                .await
                .map_err(|e| ClientError::Auth(e.to_string()))?,
        };

        let client = Client::new(config)
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))?;
        tracing::info!("Connected to Pub/Sub project {}", project_id);

        Ok(Self {
            client,
            publishers: RwLock::new(HashMap::new()),
        })
    }

    /// Handle for an existing topic in this client's project
    pub fn topic(&self, name: &str) -> Topic {
        Topic {
            name: name.to_string(),
            publisher: self.publisher(name),
        }
    }

    fn publisher(&self, name: &str) -> SdkPublisher {
        if let Some(publisher) = self
            .publishers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
        {
            return publisher.clone();
        }

        let mut publishers = self.publishers.write().unwrap_or_else(|e| e.into_inner());
        publishers
            .entry(name.to_string())
            .or_insert_with(|| self.client.topic(name).new_publisher(None))
            .clone()
    }

    /// Flush and stop every publisher; call once the server has drained
    pub async fn shutdown(&self) {
        let publishers: Vec<SdkPublisher> = self
            .publishers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .drain()
            .map(|(_, publisher)| publisher)
            .collect();

        for mut publisher in publishers {
            publisher.shutdown().await;
        }
    }
}

pub struct Topic {
    name: String,
    publisher: SdkPublisher,
}

impl Topic {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish and wait for the server-assigned message id.
    ///
    /// Dropping the returned future stops waiting for the acknowledgement.
    pub async fn publish(&self, message: PubsubMessage) -> Result<String, PublishError> {
        let awaiter = self.publisher.publish(message.into_sdk()).await;
        awaiter.get().await.map_err(|status| PublishError::Rejected {
            topic: self.name.clone(),
            status: status.to_string(),
        })
    }
}

#[async_trait]
impl Publisher for PubsubClient {
    async fn publish(&self, topic: &str, message: PubsubMessage) -> Result<String, PublishError> {
        self.topic(topic).publish(message).await
    }
}
