use std::time::Duration;

use futures::StreamExt;
use redis_connection::{pubsub::PubSubConnector, redis::Msg};
use tracing::instrument;

use crate::{config::POST_CREATED_PAYLOAD, refresher::RecommendationRefresher};

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Long-lived subscriber on the content-change channel. Transport errors
/// are retryable: the listener backs off and resubscribes, and only the
/// caller dropping the future (shutdown) ends it.
pub struct PostChangeListener {
    connector: PubSubConnector,
    channel: String,
    refresher: RecommendationRefresher,
}

impl PostChangeListener {
    pub fn new(
        connector: PubSubConnector, channel: String,
        refresher: RecommendationRefresher,
    ) -> Self {
        Self {
            connector,
            channel,
            refresher,
        }
    }

    /// Receive until cancelled. Run this under a `select!` with the
    /// shutdown signal; the future never resolves on its own.
    #[instrument(skip(self), fields(channel = %self.channel))]
    pub async fn run(&self) {
        let mut backoff = INITIAL_BACKOFF;

        loop {
            let mut pubsub =
                match self.connector.subscribe(&self.channel).await {
                    Ok(pubsub) => {
                        backoff = INITIAL_BACKOFF;
                        pubsub
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Subscribe to {} failed: {err}, retrying in \
                             {backoff:?}",
                            self.channel
                        );
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(MAX_BACKOFF);
                        continue;
                    }
                };

            let mut messages = pubsub.on_message();
            while let Some(message) = messages.next().await {
                self.dispatch(message).await;
            }

            drop(messages);
            tracing::warn!(
                "Subscription to {} ended, resubscribing in {backoff:?}",
                self.channel
            );
            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }

    async fn dispatch(&self, message: Msg) {
        let payload: String = match message.get_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Unreadable pub/sub payload: {err}");
                return;
            }
        };

        if !recognized(&payload) {
            tracing::debug!("Ignoring pub/sub payload {payload:?}");
            return;
        }

        if let Err(err) = self.refresher.refresh().await {
            tracing::warn!(
                "Recommendation refresh after {payload:?} failed: {err}"
            );
        }
    }
}

fn recognized(payload: &str) -> bool { payload == POST_CREATED_PAYLOAD }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_post_creation_payload_is_recognized() {
        assert!(recognized("product:create"));
        assert!(!recognized("product:delete"));
        assert!(!recognized(""));
        assert!(!recognized("PRODUCT:CREATE"));
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_publish_triggers_refresh() -> anyhow::Result<()> {
        use post_dao::PostDao;
        use redis_connection::config::RedisDbConfig;
        use test_utils::{
            TestMongoContainer, TestRedisContainer, create_test_category,
            create_test_post, create_test_user,
        };

        use crate::cache::RecommendationCache;

        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;

        let author = create_test_user(&mongo, "tashtego").await?;
        let category = create_test_category(&mongo, "General").await?;
        create_test_post(&mongo, "Fresh", "visible", author, &[category])
            .await?;

        let cache = RecommendationCache::new(
            redis.manager(),
            "recommend_listener_test".into(),
        );
        let refresher = RecommendationRefresher::new(
            PostDao::new(mongo.db.clone()),
            cache,
            100,
        );
        let listener = PostChangeListener::new(
            PubSubConnector::new(&RedisDbConfig::default())?,
            "listener_test_ch".into(),
            refresher,
        );

        let running = tokio::spawn(async move { listener.run().await });
        // Give the subscription a moment to land before publishing.
        tokio::time::sleep(Duration::from_millis(300)).await;

        redis.publish("listener_test_ch", "product:create").await?;

        let mut refreshed = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if redis.hash_len("recommend_listener_test").await? == 1 {
                refreshed = true;
                break;
            }
        }
        running.abort();

        assert!(refreshed);
        mongo.drop().await?;
        Ok(())
    }
}
