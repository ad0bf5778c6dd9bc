use category_dao::CategoryDao;
use mongo_connection::MongoConnect;
use post_cache_keys::{PostBySlugCacheKey, PostPageCacheKey};
use post_dao::PostDao;
use post_errors::PostError;
use post_models::{Paging, PostFilter, PostView};
use post_queries::{
    GetPostBySlugQuery, ListPostsQuery, PostsByCategoryQuery,
};
use redis_connection::{RedisTypeBind, connection::RedisConnectionManager};
use tracing::instrument;

/// Read-through handler for single posts: one hash field per slug, no TTL.
/// A field, once written, counts as a hit until something outside this
/// layer deletes it.
#[derive(Clone)]
pub struct GetPostBySlugHandler {
    post_dao: PostDao,
    redis: RedisConnectionManager,
}

impl GetPostBySlugHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            post_dao: PostDao::new(db),
            redis,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetPostBySlugQuery,
    ) -> Result<PostView, PostError> {
        if let Ok(mut conn) = self.redis.get_connection().await {
            let mut cache = PostBySlugCacheKey.bind(&mut conn);
            if let Ok(Some(view)) = cache.try_get(query.slug.as_str()).await {
                tracing::debug!("Cache hit for post {}", query.slug);
                return Ok(view);
            }
        }

        tracing::debug!(
            "Cache miss for post {}, fetching from store",
            query.slug
        );

        let view = self
            .post_dao
            .find_view_by_slug(&query.slug)
            .await?
            .ok_or_else(|| {
                PostError::NotFound {
                    slug: query.slug.clone(),
                }
            })?;

        self.populate(&view).await;

        Ok(view)
    }

    async fn populate(&self, view: &PostView) {
        let result: Result<(), PostError> = async {
            let mut conn = self.redis.get_connection().await?;
            let mut cache = PostBySlugCacheKey.bind(&mut conn);
            cache
                .set::<(), _>(view.slug.as_str(), view.clone())
                .await?;
            Ok(())
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(
                "Failed to populate post cache for {}: {err}",
                view.slug
            );
        }
    }
}

/// Read-through handler for filtered, paginated listings. One list key per
/// (page, limit, status, category) tuple, holding exactly that page
/// window; an undersized window is a miss, and repopulation replaces the
/// key wholesale.
#[derive(Clone)]
pub struct ListPostsHandler {
    post_dao: PostDao,
    redis: RedisConnectionManager,
}

impl ListPostsHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            post_dao: PostDao::new(db),
            redis,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListPostsQuery,
    ) -> Result<Vec<PostView>, PostError> {
        let paging = query.paging.normalized();
        let filter = query.filter;

        if let Some(views) = self.cached_page(&filter, &paging).await {
            tracing::debug!(
                "Cache hit for page {} ({})",
                paging.page,
                filter.status
            );
            return Ok(views);
        }

        tracing::debug!(
            "Cache miss for page {} ({}), fetching from store",
            paging.page,
            filter.status
        );

        let views = self.post_dao.list_views(&filter, &paging).await?;

        self.populate(&filter, &paging, &views).await;

        Ok(views)
    }

    /// The stored window for this key, which holds the page's rows from
    /// position 0; anything shorter than the full window is a miss.
    async fn cached_page(
        &self, filter: &PostFilter, paging: &Paging,
    ) -> Option<Vec<PostView>> {
        let mut conn = self.redis.get_connection().await.ok()?;
        let mut cache = PostPageCacheKey.bind_with_args(
            &mut conn,
            page_key_args(filter, paging),
        );

        let views = cache.range(0, paging.limit as isize - 1).await.ok()?;

        (views.len() == paging.limit as usize).then_some(views)
    }

    /// Replace the key wholesale, never append: a stale or short window
    /// left over from a previous populate must not survive behind the
    /// fresh rows.
    async fn populate(
        &self, filter: &PostFilter, paging: &Paging, views: &[PostView],
    ) {
        let result: Result<(), PostError> = async {
            let mut conn = self.redis.get_connection().await?;
            let mut cache = PostPageCacheKey.bind_with_args(
                &mut conn,
                page_key_args(filter, paging),
            );
            cache.remove::<()>().await?;
            cache.push_many(views).await?;
            Ok(())
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(
                "Failed to populate list cache for page {}: {err}",
                paging.page
            );
        }
    }
}

fn page_key_args<'r>(
    filter: &'r PostFilter, paging: &'r Paging,
) -> (&'r i64, &'r i64, &'r str, &'r str) {
    (
        &paging.page,
        &paging.limit,
        filter.status.as_str(),
        filter.category_id.as_deref().unwrap_or(""),
    )
}

/// Uncached listing of every post referencing a category, resolved from
/// the category slug.
#[derive(Clone)]
pub struct PostsByCategoryHandler {
    post_dao: PostDao,
    category_dao: CategoryDao,
}

impl PostsByCategoryHandler {
    pub fn new(db: MongoConnect) -> Self {
        Self {
            post_dao: PostDao::new(db.clone()),
            category_dao: CategoryDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: PostsByCategoryQuery,
    ) -> Result<Vec<PostView>, PostError> {
        let category = self
            .category_dao
            .find_by_slug(&query.category_slug)
            .await?;

        self.post_dao.views_by_category(&category.id).await
    }
}

#[cfg(test)]
mod tests {
    use post_models::PostStatus;

    use super::*;

    #[test]
    fn test_page_key_args_default_filter() {
        let filter = PostFilter::default();
        let paging = Paging::default().normalized();

        let (page, limit, status, category) =
            page_key_args(&filter, &paging);
        assert_eq!(*page, 1);
        assert_eq!(*limit, 10);
        assert_eq!(status, "visible");
        assert_eq!(category, "");
    }

    #[test]
    fn test_page_key_args_with_category() {
        let filter = PostFilter {
            status: PostStatus::Hidden,
            category_id: Some("64b0c9f2a1".into()),
        };
        let paging = Paging { page: 3, limit: 20 };

        let (page, limit, status, category) =
            page_key_args(&filter, &paging);
        assert_eq!(*page, 3);
        assert_eq!(*limit, 20);
        assert_eq!(status, "hidden");
        assert_eq!(category, "64b0c9f2a1");
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_post_by_slug_served_from_cache_after_store_delete()
    -> anyhow::Result<()> {
        use mongo_connection::bson::{Document, doc};
        use test_utils::{
            TestMongoContainer, TestRedisContainer, create_test_category,
            create_test_post, create_test_user,
        };

        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        redis.flush_db().await?;

        let author = create_test_user(&mongo, "ishmael").await?;
        let category = create_test_category(&mongo, "Databases").await?;
        create_test_post(
            &mongo,
            "Hello World",
            "visible",
            author,
            &[category],
        )
        .await?;

        let handler =
            GetPostBySlugHandler::new(mongo.db.clone(), redis.manager());

        let first = handler
            .execute(GetPostBySlugQuery {
                slug: "hello-world".into(),
            })
            .await?;
        assert_eq!(first.title, "Hello World");
        assert_eq!(first.author, "ishmael");

        mongo
            .db
            .collection::<Document>("posts")
            .delete_one(doc! { "slug": "hello-world" })
            .await?;

        let second = handler
            .execute(GetPostBySlugQuery {
                slug: "hello-world".into(),
            })
            .await?;
        assert_eq!(second, first);

        mongo.drop().await?;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_list_posts_repeat_page_is_stable() -> anyhow::Result<()> {
        use test_utils::{
            TestMongoContainer, TestRedisContainer, create_test_category,
            create_test_post, create_test_user,
        };

        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        redis.flush_db().await?;

        let author = create_test_user(&mongo, "queequeg").await?;
        let category = create_test_category(&mongo, "Systems").await?;
        for n in 0..25 {
            create_test_post(
                &mongo,
                &format!("Post number {n:02}"),
                "visible",
                author,
                &[category],
            )
            .await?;
            // createdAt has millisecond precision; keep the sort order
            // deterministic.
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let handler =
            ListPostsHandler::new(mongo.db.clone(), redis.manager());
        let query = || {
            ListPostsQuery {
                filter: PostFilter::default(),
                paging: Paging { page: 2, limit: 10 },
            }
        };

        let first = handler.execute(query()).await?;
        assert_eq!(first.len(), 10);

        let second = handler.execute(query()).await?;
        assert_eq!(second, first);

        let third = handler.execute(query()).await?;
        assert_eq!(third, first);

        mongo.drop().await?;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_list_posts_mixed_limits_stay_consistent()
    -> anyhow::Result<()> {
        use test_utils::{
            TestMongoContainer, TestRedisContainer, create_test_category,
            create_test_post, create_test_user,
        };

        let mongo = TestMongoContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        redis.flush_db().await?;

        let author = create_test_user(&mongo, "daggoo").await?;
        let category = create_test_category(&mongo, "Tooling").await?;
        for n in 0..30 {
            create_test_post(
                &mongo,
                &format!("Entry number {n:02}"),
                "visible",
                author,
                &[category],
            )
            .await?;
            // createdAt has millisecond precision; keep the sort order
            // deterministic.
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let handler =
            ListPostsHandler::new(mongo.db.clone(), redis.manager());
        let page_one = |limit| {
            ListPostsQuery {
                filter: PostFilter::default(),
                paging: Paging { page: 1, limit },
            }
        };

        // Warm both windows, then read each again: the narrow window must
        // be the prefix of the wide one, with no duplicated rows.
        let narrow = handler.execute(page_one(10)).await?;
        let wide = handler.execute(page_one(30)).await?;
        assert_eq!(narrow.len(), 10);
        assert_eq!(wide.len(), 30);
        assert_eq!(narrow[..], wide[..10]);

        let narrow_again = handler.execute(page_one(10)).await?;
        let wide_again = handler.execute(page_one(30)).await?;
        assert_eq!(narrow_again, narrow);
        assert_eq!(wide_again, wide);

        mongo.drop().await?;
        Ok(())
    }
}
