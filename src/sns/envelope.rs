/// SNS callback envelope
///
/// Decodes the JSON body SNS posts to an HTTP(S) subscriber into a typed record.
/// Field names are matched case-sensitively against the SNS wire names; unknown
/// fields are ignored and missing (or null) fields decode as empty strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnsEnvelope {
    /// Callback kind ("SubscriptionConfirmation", "Notification", ...)
    #[serde(rename = "Type", default, deserialize_with = "nullable")]
    pub kind: String,

    #[serde(rename = "MessageId", default, deserialize_with = "nullable")]
    pub message_id: String,

    #[serde(rename = "Token", default, deserialize_with = "nullable")]
    pub token: String,

    /// ARN of the topic that produced this callback
    #[serde(rename = "TopicArn", default, deserialize_with = "nullable")]
    pub topic_arn: String,

    #[serde(rename = "Subject", default, deserialize_with = "nullable")]
    pub subject: String,

    /// Payload, relayed verbatim
    #[serde(rename = "Message", default, deserialize_with = "nullable")]
    pub message: String,

    /// One-shot URL that finalizes a pending subscription
    #[serde(rename = "SubscribeURL", default, deserialize_with = "nullable")]
    pub subscribe_url: String,

    #[serde(rename = "Timestamp", default, deserialize_with = "nullable")]
    pub timestamp: String,

    #[serde(rename = "SignatureVersion", default, deserialize_with = "nullable")]
    pub signature_version: String,

    #[serde(rename = "Signature", default, deserialize_with = "nullable")]
    pub signature: String,

    #[serde(rename = "SigningCertURL", default, deserialize_with = "nullable")]
    pub signing_cert_url: String,

    #[serde(rename = "UnsubscribeURL", default, deserialize_with = "nullable")]
    pub unsubscribe_url: String,
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a body could not be turned into an envelope
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Not well-formed JSON (or truncated)
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Well-formed JSON that does not have the envelope's shape
    #[error("invalid SNS envelope: {0}")]
    Shape(#[source] serde_json::Error),
}

impl SnsEnvelope {
    /// Decode a raw callback body.
    ///
    /// Only a JSON object is an envelope; fields are taken by name, never by position.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body).map_err(DecodeError::Syntax)?;
        if !value.is_object() {
            return Err(DecodeError::Shape(serde_json::Error::custom(
                "SNS envelope must be a JSON object",
            )));
        }

        serde_json::from_value(value).map_err(DecodeError::Shape)
    }

    /// Classify the `Type` field, ignoring case
    pub fn callback_kind(&self) -> CallbackKind {
        match self.kind.to_lowercase().as_str() {
            "subscriptionconfirmation" => CallbackKind::SubscriptionConfirmation,
            "notification" => CallbackKind::Notification,
            _ => CallbackKind::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    SubscriptionConfirmation,
    Notification,
    Unrecognized,
}
