/// Subscription confirmation
///
/// SNS finalizes an HTTP(S) subscription once the endpoint fetches the
/// `SubscribeURL` it was sent. One GET, no retries, body ignored.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error("invalid subscribe URL {url:?}: {reason}")]
    Construct { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
}

/// Completes the SNS subscription handshake
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, subscribe_url: &str) -> Result<(), ConfirmError>;
}

/// Confirms subscriptions with a shared reqwest client
#[derive(Clone, Default)]
pub struct HttpConfirmer {
    http: reqwest::Client,
}

impl HttpConfirmer {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Confirmer for HttpConfirmer {
    async fn confirm(&self, subscribe_url: &str) -> Result<(), ConfirmError> {
        let url = Url::parse(subscribe_url).map_err(|e| ConfirmError::Construct {
            url: subscribe_url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ConfirmError::Transport {
                url: subscribe_url.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ConfirmError::Status {
                url: subscribe_url.to_string(),
                status,
            }),
        }
    }
}
