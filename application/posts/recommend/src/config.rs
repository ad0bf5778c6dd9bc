/// Payload recognized on the change channel; anything else is ignored.
pub const POST_CREATED_PAYLOAD: &str = "product:create";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecommendConfig {
    /// Hash key holding the {slug: title} recommendation set.
    #[serde(default = "key_default")]
    pub key: String,
    /// Pub/sub channel carrying content-change notifications.
    #[serde(default = "channel_default")]
    pub channel: String,
    /// Ceiling on the number of entries a refresh samples.
    #[serde(default = "sample_size_default")]
    pub sample_size: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            key: key_default(),
            channel: channel_default(),
            sample_size: sample_size_default(),
        }
    }
}

fn key_default() -> String { "post_recommend".into() }
fn channel_default() -> String { "post_recom_ch".into() }
fn sample_size_default() -> usize { 100 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_config_defaults() {
        let config: RecommendConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.key, "post_recommend");
        assert_eq!(config.channel, "post_recom_ch");
        assert_eq!(config.sample_size, 100);
    }
}
