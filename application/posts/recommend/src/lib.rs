pub mod cache;
pub mod config;
pub mod listener;
pub mod refresher;

pub use cache::RecommendationCache;
pub use config::RecommendConfig;
pub use listener::PostChangeListener;
pub use refresher::RecommendationRefresher;

use post_dao::PostDao;
use post_errors::PostError;
use post_models::{PostStatus, RecommendationEntry};
use post_queries::RandomPostsQuery;
use tracing::instrument;

/// Random-recommendation read path. The cache side samples the hash
/// directly; anything short of an exact-size sample (including transport
/// errors) falls back to a fresh store-side sample that is returned
/// without being written back, since the hash is only ever rebuilt by
/// the refresher.
#[derive(Clone)]
pub struct ListRandomPostsHandler {
    post_dao: PostDao,
    cache: RecommendationCache,
}

impl ListRandomPostsHandler {
    pub fn new(post_dao: PostDao, cache: RecommendationCache) -> Self {
        Self { post_dao, cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: RandomPostsQuery,
    ) -> Result<Vec<RecommendationEntry>, PostError> {
        let query = query.normalized();

        match self.cache.sample(query.n).await {
            Ok(Some(entries)) => {
                tracing::debug!("Cache hit for {} recommendations", query.n);
                return Ok(entries);
            }
            Ok(None) => {
                tracing::debug!(
                    "Recommendation cache undersized for n={}, falling back \
                     to store",
                    query.n
                );
            }
            Err(err) => {
                tracing::warn!("Recommendation cache unavailable: {err}");
            }
        }

        self.post_dao
            .sample_random(PostStatus::Visible, query.n)
            .await
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{
        TestMongoContainer, TestRedisContainer, create_test_category,
        create_test_post, create_test_user,
    };

    use super::*;
    use crate::cache::RecommendationCache;
    use crate::refresher::RecommendationRefresher;

    async fn seed_visible_posts(
        mongo: &TestMongoContainer, titles: &[&str],
    ) -> anyhow::Result<()> {
        let author = create_test_user(mongo, "starbuck").await?;
        let category = create_test_category(mongo, "General").await?;
        for title in titles {
            create_test_post(mongo, title, "visible", author, &[category])
                .await?;
        }
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_undersized_sample_falls_back_to_store()
    -> anyhow::Result<()> {
        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;

        seed_visible_posts(&mongo, &["One", "Two", "Three", "Four"])
            .await?;

        let post_dao = PostDao::new(mongo.db.clone());
        let cache = RecommendationCache::new(
            redis.manager(),
            "recommend_fallback_test".into(),
        );
        let refresher = RecommendationRefresher::new(
            post_dao.clone(),
            cache.clone(),
            100,
        );

        assert_eq!(refresher.refresh().await?, 4);

        let handler = ListRandomPostsHandler::new(post_dao, cache);
        let entries = handler
            .execute(RandomPostsQuery { n: 10 })
            .await?;
        assert_eq!(entries.len(), 4);

        // The fallback never writes back into the hash.
        assert_eq!(redis.hash_len("recommend_fallback_test").await?, 4);

        mongo.drop().await?;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_refresh_replaces_hash_wholesale() -> anyhow::Result<()> {
        use mongo_connection::bson::{Document, doc};

        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;

        seed_visible_posts(&mongo, &["Alpha", "Beta"]).await?;

        let post_dao = PostDao::new(mongo.db.clone());
        let cache = RecommendationCache::new(
            redis.manager(),
            "recommend_replace_test".into(),
        );
        let refresher = RecommendationRefresher::new(
            post_dao.clone(),
            cache.clone(),
            100,
        );

        assert_eq!(refresher.refresh().await?, 2);

        mongo
            .db
            .collection::<Document>("posts")
            .delete_one(doc! { "slug": "beta" })
            .await?;
        let author = create_test_user(&mongo, "pip").await?;
        create_test_post(&mongo, "Gamma", "visible", author, &[]).await?;

        assert_eq!(refresher.refresh().await?, 2);

        let mut slugs: Vec<String> = cache
            .sample(2)
            .await?
            .into_iter()
            .flatten()
            .map(|entry| entry.slug)
            .collect();
        slugs.sort();
        assert_eq!(slugs, vec!["alpha".to_string(), "gamma".to_string()]);

        mongo.drop().await?;
        Ok(())
    }
}
