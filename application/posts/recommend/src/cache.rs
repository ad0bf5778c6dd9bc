use post_errors::PostError;
use post_models::RecommendationEntry;
use redis_connection::{
    AsyncCommands, connection::RedisConnectionManager,
};
use tracing::instrument;

/// Bounded hash of {slug: title} pairs under a configured key. Values are
/// stored as raw strings, not JSON, so the hash stays readable by any
/// consumer of the key.
#[derive(Clone)]
pub struct RecommendationCache {
    redis: RedisConnectionManager,
    key: String,
}

impl RecommendationCache {
    pub fn new(redis: RedisConnectionManager, key: String) -> Self {
        Self { redis, key }
    }

    pub fn key(&self) -> &str { &self.key }

    /// Replace the hash wholesale: delete, then write all pairs in one
    /// `HSET`. Entries absent from `entries` are gone afterwards.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn replace(
        &self, entries: &[RecommendationEntry],
    ) -> Result<(), PostError> {
        let mut conn = self.redis.get_connection().await?;

        conn.del::<_, ()>(&self.key).await?;

        if entries.is_empty() {
            return Ok(());
        }

        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|entry| (entry.slug.as_str(), entry.title.as_str()))
            .collect();
        conn.hset_multiple::<_, _, _, ()>(&self.key, &pairs).await?;

        Ok(())
    }

    /// Random field+value sample of size `n` straight from the hash
    /// (`HRANDFIELD .. WITHVALUES`). Returns `None` when the sample comes
    /// back with any other size; the caller treats that as a miss.
    #[instrument(skip(self))]
    pub async fn sample(
        &self, n: usize,
    ) -> Result<Option<Vec<RecommendationEntry>>, PostError> {
        let mut conn = self.redis.get_connection().await?;

        let pairs: Vec<(String, String)> = redis_connection::redis::cmd("HRANDFIELD")
            .arg(&self.key)
            .arg(n)
            .arg("WITHVALUES")
            .query_async(&mut conn)
            .await?;

        if pairs.len() != n {
            return Ok(None);
        }

        Ok(Some(
            pairs
                .into_iter()
                .map(|(slug, title)| RecommendationEntry { title, slug })
                .collect(),
        ))
    }
}
