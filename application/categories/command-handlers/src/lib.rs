use category_cache_keys::CategoriesCacheKey;
use category_commands::CreateCategoryCommand;
use category_dao::CategoryDao;
use category_errors::CategoryError;
use category_models::{Category, CategorySummary, CreateCategoryParams};
use mongo_connection::MongoConnect;
use mongodb::bson::DateTime;
use redis_connection::{
    RedisTypeBind, connection::RedisConnectionManager,
};
use tracing::instrument;

/// Creates a category and eagerly invalidates the `all_categories` key
/// before returning, so the next listing read cannot observe a cached set
/// that misses this category.
#[derive(Clone)]
pub struct CreateCategoryHandler {
    category_dao: CategoryDao,
    redis: RedisConnectionManager,
}

impl CreateCategoryHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
            redis,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateCategoryCommand,
    ) -> Result<CategorySummary, CategoryError> {
        let now = DateTime::now();
        let params = CreateCategoryParams {
            slug: slug::slugify(&command.name),
            name: command.name,
            created_at: now,
            updated_at: now,
        };

        let id = self.category_dao.create(params).await?;
        let category = self.category_dao.find_by_id(&id).await?;

        invalidate_category_cache(&self.redis).await?;

        Ok(CategorySummary {
            id: category.id,
            name: category.name,
            slug: category.slug,
        })
    }
}

/// Deletes a category by slug. The category set changed, so the listing
/// key gets the same eager invalidation as creation.
#[derive(Clone)]
pub struct DeleteCategoryHandler {
    category_dao: CategoryDao,
    redis: RedisConnectionManager,
}

impl DeleteCategoryHandler {
    pub fn new(db: MongoConnect, redis: RedisConnectionManager) -> Self {
        Self {
            category_dao: CategoryDao::new(db),
            redis,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, slug: &str,
    ) -> Result<Category, CategoryError> {
        let deleted = self.category_dao.delete_by_slug(slug).await?;

        invalidate_category_cache(&self.redis).await?;

        Ok(deleted)
    }
}

#[instrument(skip(redis))]
async fn invalidate_category_cache(
    redis: &RedisConnectionManager,
) -> Result<(), CategoryError> {
    let mut conn = redis.get_connection().await?;
    let mut cache = CategoriesCacheKey.bind(&mut conn);
    cache.remove::<()>().await?;
    tracing::debug!("Invalidated category list cache");
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_utils::{TestMongoContainer, TestRedisContainer};

    use super::*;

    #[tokio::test]
    #[ignore = "requires local MongoDB and Redis"]
    async fn test_create_slugifies_name_and_invalidates() {
        let mongo = TestMongoContainer::new().await.unwrap();
        let redis = TestRedisContainer::new().await.unwrap();
        redis.flush_db().await.unwrap();

        redis
            .set_raw("all_categories", "[]")
            .await
            .unwrap();

        let handler =
            CreateCategoryHandler::new(mongo.db.clone(), redis.manager());
        let created = handler
            .execute(CreateCategoryCommand {
                name: "Systems Programming".into(),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Systems Programming");
        assert_eq!(created.slug, "systems-programming");
        assert!(!redis.key_exists("all_categories").await.unwrap());

        mongo.drop().await.unwrap();
    }
}
