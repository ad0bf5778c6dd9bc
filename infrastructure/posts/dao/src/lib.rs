use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
};
use mongo_connection::MongoConnect;
use post_errors::PostError;
use post_models::{
    CreatePostParams, Paging, Post, PostFilter, PostStatus, PostView,
    RecommendationEntry,
};
use tracing::instrument;

pub const POST_COLLECTION: &str = "posts";
pub const CATEGORY_COLLECTION: &str = "categories";
pub const USER_COLLECTION: &str = "users";

/// The two `$lookup` stages plus author flattening shared by every joined
/// read. Applied after filtering/pagination so only the returned window
/// pays the join cost.
fn join_stages() -> [Document; 4] {
    [
        doc! { "$lookup": {
            "from": CATEGORY_COLLECTION,
            "localField": "categories",
            "foreignField": "_id",
            "as": "categories",
        }},
        doc! { "$lookup": {
            "from": USER_COLLECTION,
            "localField": "author",
            "foreignField": "_id",
            "as": "author",
        }},
        doc! { "$unwind": "$author" },
        doc! { "$set": { "author": "$author.username" } },
    ]
}

#[derive(Clone)]
pub struct PostDao {
    db: MongoConnect,
}

impl PostDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Post> {
        self.db.collection(POST_COLLECTION)
    }

    /// Insert a new post. The id is generated client-side so the caller
    /// gets it back without a second round trip.
    #[instrument(skip(self, params), fields(post.slug = %params.slug))]
    pub async fn create(
        &self, params: CreatePostParams,
    ) -> Result<ObjectId, PostError> {
        let post = Post {
            id: ObjectId::new(),
            title: params.title,
            description: params.description,
            photo: params.photo,
            author: params.author,
            categories: params.categories,
            slug: params.slug,
            status: params.status,
            created_at: params.created_at,
            updated_at: params.updated_at,
        };

        self.collection().insert_one(&post).await?;
        Ok(post.id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self, id: &ObjectId,
    ) -> Result<Post, PostError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(PostError::NotFoundById { id: *id })
    }

    /// Fully-joined view for one slug, or `None` when no post carries it.
    #[instrument(skip(self))]
    pub async fn find_view_by_slug(
        &self, slug: &str,
    ) -> Result<Option<PostView>, PostError> {
        let mut pipeline = vec![doc! { "$match": { "slug": slug } }];
        pipeline.extend(join_stages());

        let mut cursor = self
            .collection()
            .aggregate(pipeline)
            .with_type::<PostView>()
            .await?;

        Ok(cursor.try_next().await?)
    }

    /// One page of joined views: filter by status (and category when
    /// present), newest first, then the skip/limit window. A document that
    /// fails to decode aborts the whole fetch.
    #[instrument(skip(self))]
    pub async fn list_views(
        &self, filter: &PostFilter, paging: &Paging,
    ) -> Result<Vec<PostView>, PostError> {
        let mut match_doc = doc! { "status": filter.status.as_str() };
        if let Some(category_id) =
            filter.category_id.as_deref().filter(|id| !id.is_empty())
        {
            let category_id = ObjectId::parse_str(category_id)?;
            match_doc
                .insert("categories", doc! { "$in": [category_id] });
        }

        let mut pipeline = vec![
            doc! { "$match": match_doc },
            doc! { "$sort": { "createdAt": -1 } },
            doc! { "$skip": paging.skip() },
            doc! { "$limit": paging.limit },
        ];
        pipeline.extend(join_stages());

        let cursor = self
            .collection()
            .aggregate(pipeline)
            .with_type::<PostView>()
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// All joined views referencing one category, unpaginated.
    #[instrument(skip(self))]
    pub async fn views_by_category(
        &self, category_id: &ObjectId,
    ) -> Result<Vec<PostView>, PostError> {
        let mut pipeline = vec![doc! {
            "$match": { "categories": { "$in": [category_id] } },
        }];
        pipeline.extend(join_stages());

        let cursor = self
            .collection()
            .aggregate(pipeline)
            .with_type::<PostView>()
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Server-side random sample of up to `n` posts with the given status,
    /// projected to {slug, title}. `$sample` may return fewer when the
    /// collection holds fewer matching documents.
    #[instrument(skip(self))]
    pub async fn sample_random(
        &self, status: PostStatus, n: usize,
    ) -> Result<Vec<RecommendationEntry>, PostError> {
        let pipeline = vec![
            doc! { "$match": { "status": status.as_str() } },
            doc! { "$sample": { "size": n as i64 } },
            doc! { "$project": { "_id": 0, "title": 1, "slug": 1 } },
        ];

        let cursor = self
            .collection()
            .aggregate(pipeline)
            .with_type::<RecommendationEntry>()
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
