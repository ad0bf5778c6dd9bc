use redis::{RedisError, RedisResult, aio::PubSub};
use tracing::info;

use crate::config::DbConnectConfig;

/// Pub/sub requires a dedicated connection outside the pool; this connector
/// owns a [`redis::Client`] for the same instance the pool talks to and
/// hands out freshly subscribed [`PubSub`] connections.
#[derive(Clone)]
pub struct PubSubConnector {
    client: redis::Client,
}

impl PubSubConnector {
    pub fn new<C>(config: &C) -> Result<Self, RedisError>
    where
        C: DbConnectConfig,
    {
        let url = crate::redis_url(config);
        let client = redis::Client::open(url.as_str())?;
        Ok(Self { client })
    }

    /// Open a pub/sub connection already subscribed to `channel`.
    pub async fn subscribe(&self, channel: &str) -> RedisResult<PubSub> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;
        info!(redis.channel = channel, "subscribed");
        Ok(pubsub)
    }
}
