//! Process configuration.
//!
//! Read once at startup from flags or environment variables (a `.env` file is
//! honored by the binary) and never mutated afterwards. Pub/Sub credentials
//! and `PUBSUB_EMULATOR_HOST` are picked up by the SDK from the environment.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

use crate::server::{normalize_path, DEFAULT_MAX_BODY_BYTES, HEALTH_PATH};

#[derive(Parser, Debug, Clone)]
#[command(name = "sns-pubsub-relay")]
#[command(version, about = "Relay Amazon SNS notifications to a Google Cloud Pub/Sub topic", long_about = None)]
pub struct RelayConfig {
    /// GCP project that owns the destination topic
    #[arg(long, env = "GCP_PROJECT", default_value = "")]
    pub project_id: String,

    /// Destination topic name (must already exist)
    #[arg(long, env = "TOPIC_NAME", default_value = "")]
    pub topic_name: String,

    /// The only SNS topic ARN callbacks are accepted from
    #[arg(long, env = "SNS_ARN", default_value = "")]
    pub sns_topic_arn: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path SNS posts callbacks to
    #[arg(long, env = "RELAY_PATH", default_value = "/", value_parser = parse_relay_path)]
    pub path: String,

    /// Largest accepted callback body in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl RelayConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_relay_path(value: &str) -> Result<String, String> {
    let path = normalize_path(value);
    if path == HEALTH_PATH {
        return Err(format!("{} is reserved for the health check", HEALTH_PATH));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = RelayConfig::try_parse_from([
            "sns-pubsub-relay",
            "--project-id",
            "my-project",
            "--topic-name",
            "events-in",
            "--sns-topic-arn",
            "arn:aws:sns:us-east-1:123456789012:events",
            "--port",
            "9000",
            "--path",
            "sns",
        ])
        .unwrap();

        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.topic_name, "events-in");
        assert_eq!(config.sns_topic_arn, "arn:aws:sns:us-east-1:123456789012:events");
        assert_eq!(config.listen_addr().port(), 9000);
        assert_eq!(config.path, "/sns");
    }

    #[test]
    fn test_flag_defaults() {
        let config = RelayConfig::try_parse_from([
            "sns-pubsub-relay",
            "--project-id",
            "p",
            "--topic-name",
            "t",
            "--sns-topic-arn",
            "a",
            "--bind-addr",
            "127.0.0.1",
            "--port",
            "8080",
            "--path",
            "/",
        ])
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.path, "/");
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_health_path_rejected() {
        for path in ["/health", "health"] {
            let result = RelayConfig::try_parse_from(["sns-pubsub-relay", "--path", path]);
            assert!(result.is_err(), "path {:?}", path);
        }
    }
}
