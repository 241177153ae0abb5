use serde::{Deserialize, Serialize};

/// Connection settings for the `DynamoDB` client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamoConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Optional endpoint URL for local development (e.g. `DynamoDB` Local).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl DynamoConfig {
    /// Create a new `DynamoConfig` with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self::new("us-east-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = DynamoConfig::default();
        assert_eq!(cfg.region, "us-east-1");
        assert!(cfg.endpoint_url.is_none());
    }

    #[test]
    fn custom_values() {
        let cfg = DynamoConfig::new("eu-west-1").with_endpoint_url("http://localhost:8000");
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(cfg.endpoint_url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn endpoint_is_optional_when_deserializing() {
        let cfg: DynamoConfig = toml::from_str(r#"region = "ap-southeast-2""#).unwrap();
        assert_eq!(cfg, DynamoConfig::new("ap-southeast-2"));
    }
}
