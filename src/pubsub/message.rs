/// Pub/Sub message built from an SNS notification

use std::collections::HashMap;

use gcloud_googleapis::pubsub::v1::PubsubMessage as SdkPubsubMessage;

use crate::sns::SnsEnvelope;

/// Attribute carrying the SNS `MessageId`
pub const ATTR_SNS_MESSAGE_ID: &str = "snsMessageId";

/// Attribute carrying the SNS `Subject`
pub const ATTR_SNS_SUBJECT: &str = "snsSubject";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubsubMessage {
    pub data: Vec<u8>,
    pub attributes: HashMap<String, String>,
}

impl PubsubMessage {
    /// Data is the UTF-8 of `Message`; attributes are exactly the SNS message id and subject.
    pub fn from_envelope(envelope: &SnsEnvelope) -> Self {
        let attributes = HashMap::from([
            (ATTR_SNS_MESSAGE_ID.to_string(), envelope.message_id.clone()),
            (ATTR_SNS_SUBJECT.to_string(), envelope.subject.clone()),
        ]);

        Self {
            data: envelope.message.as_bytes().to_vec(),
            attributes,
        }
    }

    pub(crate) fn into_sdk(self) -> SdkPubsubMessage {
        SdkPubsubMessage {
            data: self.data,
            attributes: self.attributes,
            ..Default::default()
        }
    }
}
