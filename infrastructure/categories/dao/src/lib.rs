use category_errors::CategoryError;
use category_models::{Category, CategorySummary, CreateCategoryParams};
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
};
use mongo_connection::MongoConnect;
use tracing::instrument;

pub const CATEGORY_COLLECTION: &str = "categories";

#[derive(Clone)]
pub struct CategoryDao {
    db: MongoConnect,
}

impl CategoryDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Category> {
        self.db.collection(CATEGORY_COLLECTION)
    }

    /// Insert a new category. The id is generated client-side so the
    /// caller gets it back without a second round trip.
    #[instrument(skip(self))]
    pub async fn create(
        &self, params: CreateCategoryParams,
    ) -> Result<ObjectId, CategoryError> {
        let category = Category {
            id: ObjectId::new(),
            name: params.name,
            slug: params.slug,
            created_at: params.created_at,
            updated_at: params.updated_at,
        };

        self.collection().insert_one(&category).await?;
        Ok(category.id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self, id: &ObjectId,
    ) -> Result<Category, CategoryError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                CategoryError::NotFoundById {
                    id: *id,
                }
            })
    }

    #[instrument(skip(self))]
    pub async fn find_by_slug(
        &self, slug: &str,
    ) -> Result<Category, CategoryError> {
        self.collection()
            .find_one(doc! { "slug": slug })
            .await?
            .ok_or_else(|| {
                CategoryError::NotFound {
                    slug: slug.to_string(),
                }
            })
    }

    /// Full category list projected to summaries, in store order.
    #[instrument(skip(self))]
    pub async fn list_summaries(
        &self,
    ) -> Result<Vec<CategorySummary>, CategoryError> {
        let collection: Collection<CategorySummary> =
            self.db.collection(CATEGORY_COLLECTION);
        let summaries = collection.find(doc! {}).await?.try_collect().await?;
        Ok(summaries)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_slug(
        &self, slug: &str,
    ) -> Result<Category, CategoryError> {
        self.collection()
            .find_one_and_delete(doc! { "slug": slug })
            .await?
            .ok_or_else(|| {
                CategoryError::NotFound {
                    slug: slug.to_string(),
                }
            })
    }
}
