use mongo_connection::MongoConnect;
use mongodb::bson::{DateTime, oid::ObjectId};
use post_commands::CreatePostCommand;
use post_dao::PostDao;
use post_errors::PostError;
use post_models::{CreatePostParams, Post, PostStatus};
use post_recommend::config::POST_CREATED_PAYLOAD;
use redis_connection::{
    AsyncCommands, connection::RedisConnectionManager,
};
use tracing::instrument;

/// Creates a post and publishes a change notification so the
/// recommendation refresher picks the new post up. The slug and list
/// caches are deliberately left alone.
#[derive(Clone)]
pub struct CreatePostHandler {
    post_dao: PostDao,
    redis: RedisConnectionManager,
    channel: String,
}

impl CreatePostHandler {
    pub fn new(
        db: MongoConnect, redis: RedisConnectionManager, channel: String,
    ) -> Self {
        Self {
            post_dao: PostDao::new(db),
            redis,
            channel,
        }
    }

    #[instrument(skip(self, command), fields(post.title = %command.title))]
    pub async fn execute(
        &self, command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let status: PostStatus = command.status.parse()?;
        let author = ObjectId::parse_str(&command.author)?;
        let categories = command
            .categories
            .iter()
            .map(|id| ObjectId::parse_str(id))
            .collect::<Result<Vec<_>, _>>()?;

        let now = DateTime::now();
        let params = CreatePostParams {
            slug: slug::slugify(&command.title),
            title: command.title,
            description: command.description,
            photo: command.photo,
            author,
            categories,
            status,
            created_at: now,
            updated_at: now,
        };

        let id = self.post_dao.create(params).await?;
        let post = self.post_dao.find_by_id(&id).await?;

        self.notify_change().await;

        Ok(post)
    }

    /// Best-effort publish; the post is already durable, a lost
    /// notification only delays the next recommendation refresh.
    async fn notify_change(&self) {
        let result: Result<(), PostError> = async {
            let mut conn = self.redis.get_connection().await?;
            conn.publish::<_, _, ()>(&self.channel, POST_CREATED_PAYLOAD)
                .await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                tracing::debug!(
                    "Published {POST_CREATED_PAYLOAD:?} to {}",
                    self.channel
                );
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to publish change notification: {err}"
                );
            }
        }
    }
}
