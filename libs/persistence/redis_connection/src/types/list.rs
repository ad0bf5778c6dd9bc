use std::{borrow::Cow, marker::PhantomData};

use deadpool_redis::redis::{AsyncCommands, FromRedisValue, RedisResult};
use serde::{Deserialize, Serialize};

use crate::{type_bind::RedisTypeTrait, value::Json};

/// Binding for a list key holding JSON elements.
///
/// Population appends (`RPUSH`), so the stored order is the order the
/// elements were fetched in; range reads therefore see source-query order.
pub struct List<'redis, R, T> {
    redis: &'redis mut R,
    key: Cow<'static, str>,
    __phantom: PhantomData<T>,
}

impl<'redis, R, T> RedisTypeTrait<'redis, R> for List<'redis, R, T> {
    fn from_redis_and_key(
        redis: &'redis mut R, key: Cow<'static, str>,
    ) -> Self {
        Self {
            redis,
            key,
            __phantom: PhantomData,
        }
    }
}

impl<'redis, R, T> List<'redis, R, T>
where
    R: redis::aio::ConnectionLike + Send + Sync,
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone,
{
    /// Append one element to the end of the list
    ///
    /// ## reference
    /// - [`AsyncCommands::rpush`]
    pub async fn push<RV>(&mut self, value: impl Into<Json<T>>) -> RedisResult<RV>
    where
        RV: FromRedisValue,
    {
        self.redis.rpush(&*self.key, value.into()).await
    }

    /// Append several elements in one `RPUSH`, preserving slice order
    ///
    /// ## reference
    /// - [`AsyncCommands::rpush`]
    pub async fn push_many(&mut self, values: &[T]) -> RedisResult<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        let args: Vec<Json<T>> =
            values.iter().cloned().map(Json::new).collect();
        self.redis.rpush(&*self.key, args).await
    }

    /// Inclusive range read (`LRANGE key start stop`)
    ///
    /// ## reference
    /// - [`AsyncCommands::lrange`]
    pub async fn range(
        &mut self, start: isize, stop: isize,
    ) -> RedisResult<Vec<T>> {
        let items: Vec<Json<T>> =
            self.redis.lrange(&*self.key, start, stop).await?;
        Ok(items.into_iter().map(Json::inner).collect())
    }

    /// Current list length
    ///
    /// ## reference
    /// - [`AsyncCommands::llen`]
    pub async fn len(&mut self) -> RedisResult<usize> {
        self.redis.llen(&*self.key).await
    }

    /// Delete the whole list
    ///
    /// ## reference
    /// - [`AsyncCommands::del`]
    pub async fn remove<RV>(&mut self) -> RedisResult<RV>
    where
        RV: FromRedisValue,
    {
        self.redis.del(&*self.key).await
    }
}
