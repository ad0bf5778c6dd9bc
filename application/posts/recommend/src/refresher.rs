use post_dao::PostDao;
use post_errors::PostError;
use post_models::PostStatus;
use tracing::instrument;

use crate::cache::RecommendationCache;

/// Rebuilds the recommendation hash from a fresh random sample of visible
/// posts. Runs once at startup and again on every recognized change
/// notification; failures leave the hash in its previous state.
#[derive(Clone)]
pub struct RecommendationRefresher {
    post_dao: PostDao,
    cache: RecommendationCache,
    sample_size: usize,
}

impl RecommendationRefresher {
    pub fn new(
        post_dao: PostDao, cache: RecommendationCache, sample_size: usize,
    ) -> Self {
        Self {
            post_dao,
            cache,
            sample_size,
        }
    }

    /// Sample up to the configured ceiling of visible posts and replace
    /// the hash wholesale. Returns the number of cached entries.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize, PostError> {
        let entries = self
            .post_dao
            .sample_random(PostStatus::Visible, self.sample_size)
            .await?;

        self.cache.replace(&entries).await?;

        tracing::info!(
            key = self.cache.key(),
            count = entries.len(),
            "Recommendation cache refreshed"
        );

        Ok(entries.len())
    }
}
