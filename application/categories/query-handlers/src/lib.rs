use category_cache_keys::{CATEGORY_CACHE_TTL, CategoriesCacheKey};
use category_dao::CategoryDao;
use category_errors::CategoryError;
use category_models::CategorySummary;
use category_queries::{ListCategoriesQuery, SearchCategoriesQuery};
use mongo_connection::MongoConnect;
use redis_connection::{
    RedisTypeBind, connection::RedisConnectionManager,
};
use tracing::instrument;

/// Read-through handler for the full category listing: try the
/// `all_categories` key, fall back to the store on any cache error, then
/// repopulate best-effort.
#[derive(Clone)]
pub struct ListCategoriesHandler {
    category_dao: CategoryDao,
    redis: RedisConnectionManager,
}

impl ListCategoriesHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
            redis,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, _query: ListCategoriesQuery,
    ) -> Result<Vec<CategorySummary>, CategoryError> {
        if let Ok(mut conn) = self.redis.get_connection().await {
            let mut cache = CategoriesCacheKey.bind(&mut conn);
            if let Ok(Some(categories)) = cache.try_get().await {
                tracing::debug!("Cache hit for category list");
                return Ok(categories);
            }
        }

        tracing::debug!("Cache miss for category list, fetching from store");

        let categories = self.category_dao.list_summaries().await?;

        self.populate(&categories).await;

        Ok(categories)
    }

    async fn populate(&self, categories: &[CategorySummary]) {
        let result: Result<(), CategoryError> = async {
            let mut conn = self.redis.get_connection().await?;
            let mut cache = CategoriesCacheKey.bind(&mut conn);
            cache
                .set_with_expire::<()>(
                    categories.to_vec(),
                    CATEGORY_CACHE_TTL,
                )
                .await?;
            Ok(())
        }
        .await;

        if let Err(err) = result {
            tracing::warn!("Failed to populate category cache: {err}");
        }
    }
}

/// Substring search layered on the full listing: no per-filter cache keys,
/// the match runs client-side against the cached or freshly fetched list.
#[derive(Clone)]
pub struct SearchCategoriesHandler {
    list: ListCategoriesHandler,
}

impl SearchCategoriesHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            list: ListCategoriesHandler::new(db, redis),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: SearchCategoriesQuery,
    ) -> Result<Vec<CategorySummary>, CategoryError> {
        let categories = self.list.execute(ListCategoriesQuery).await?;

        Ok(categories
            .into_iter()
            .filter(|category| name_matches(&category.name, &query.value))
            .collect())
    }
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}
