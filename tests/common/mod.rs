//! Shared fixtures for relay integration tests

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use sns_pubsub_relay::{router, ConfirmError, Confirmer, PublishError, Publisher, PubsubMessage, Relay};

pub const SNS_ARN: &str = "arn:aws:sns:us-east-1:123456789012:events";
pub const TOPIC: &str = "events-in";

/// Publisher that records every call instead of talking to Pub/Sub
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, PubsubMessage)>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn calls(&self) -> Vec<(String, PubsubMessage)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &str, message: PubsubMessage) -> Result<String, PublishError> {
        let mut published = self.published.lock().unwrap();
        published.push((topic.to_string(), message));

        if self.fail {
            return Err(PublishError::Rejected {
                topic: topic.to_string(),
                status: "unavailable".to_string(),
            });
        }
        Ok(format!("pubsub-{}", published.len()))
    }
}

/// Confirmer that records requested URLs and answers with a fixed result
#[derive(Default)]
pub struct RecordingConfirmer {
    pub urls: Mutex<Vec<String>>,
    pub status: Option<reqwest::StatusCode>,
}

impl RecordingConfirmer {
    pub fn answering(status: reqwest::StatusCode) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn confirm(&self, subscribe_url: &str) -> Result<(), ConfirmError> {
        self.urls.lock().unwrap().push(subscribe_url.to_string());

        match self.status {
            None | Some(reqwest::StatusCode::OK) => Ok(()),
            Some(status) => Err(ConfirmError::Status {
                url: subscribe_url.to_string(),
                status,
            }),
        }
    }
}

pub struct Harness {
    pub app: Router,
    pub publisher: Arc<RecordingPublisher>,
    pub confirmer: Arc<RecordingConfirmer>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(RecordingPublisher::default(), RecordingConfirmer::default())
    }

    pub fn with(publisher: RecordingPublisher, confirmer: RecordingConfirmer) -> Self {
        let publisher = Arc::new(publisher);
        let confirmer = Arc::new(confirmer);
        let relay = Relay::new(SNS_ARN, TOPIC, publisher.clone(), confirmer.clone());

        Self {
            app: router(Arc::new(relay), "/", 64 * 1024),
            publisher,
            confirmer,
        }
    }

    pub async fn send(&self, method: &str, body: impl Into<Body>) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri("/")
            .header("content-type", "text/plain; charset=UTF-8")
            .body(body.into())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub fn outbound_calls(&self) -> usize {
        self.publisher.calls().len() + self.confirmer.calls().len()
    }
}

/// Log sink for the current test thread.
///
/// Records INFO and above without timestamps or colors; dropping the guard
/// restores the previous subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines logged at `level` ("INFO", "ERROR", ...)
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.trim_start().starts_with(level))
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
