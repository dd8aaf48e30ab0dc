/// SNS to Pub/Sub relay - HTTP endpoint for Amazon SNS subscriptions
///
/// Confirms SNS subscription handshakes and republishes SNS notifications to
/// an existing Google Cloud Pub/Sub topic.

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sns_pubsub_relay::{router, HttpConfirmer, PubsubClient, Relay, RelayConfig};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::parse();

    // One client per process; a broken instance must not receive traffic
    let pubsub = match PubsubClient::new(&config.project_id).await {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("an error occurred creating pubsub client: {}", e);
            process::exit(1);
        }
    };

    let http = match reqwest::Client::builder().build() {
        Ok(http) => http,
        Err(e) => {
            tracing::error!("an error occurred creating HTTP client: {}", e);
            process::exit(1);
        }
    };

    if config.sns_topic_arn.trim().is_empty() {
        tracing::warn!("SNS_ARN is not set, every callback will be rejected");
    }

    let relay = Relay::new(
        config.sns_topic_arn.clone(),
        config.topic_name.clone(),
        pubsub.clone(),
        Arc::new(HttpConfirmer::new(http)),
    );
    let app = router(Arc::new(relay), &config.path, config.max_body_bytes);

    let addr = config.listen_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    tracing::info!("SNS relay listening on {}{}", addr, config.path);
    tracing::info!(
        "Publishing to projects/{}/topics/{}",
        config.project_id,
        config.topic_name
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {}", e);
        process::exit(1);
    }

    pubsub.shutdown().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
