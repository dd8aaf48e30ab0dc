/// Origin gate
///
/// Only callbacks from the single configured SNS topic are accepted. Without
/// this check anyone who can reach the endpoint could publish to the
/// destination topic.

#[derive(Debug, Clone)]
pub struct OriginGate {
    expected_topic_arn: String,
}

impl OriginGate {
    pub fn new(expected_topic_arn: impl Into<String>) -> Self {
        Self {
            expected_topic_arn: expected_topic_arn.into(),
        }
    }

    /// Accept iff both ARNs match byte for byte after trimming ASCII whitespace.
    /// An unset expected ARN accepts nothing.
    pub fn accepts(&self, topic_arn: &str) -> bool {
        let expected = trim_ascii(&self.expected_topic_arn);
        !expected.is_empty() && trim_ascii(topic_arn) == expected
    }

    pub fn expected_topic_arn(&self) -> &str {
        &self.expected_topic_arn
    }
}

fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}
