use std::{borrow::Cow, collections::HashMap, marker::PhantomData};

use deadpool_redis::redis::{
    AsyncCommands, FromRedisValue, RedisResult, ToRedisArgs,
};
use serde::{Deserialize, Serialize};

use crate::{type_bind::RedisTypeTrait, value::Json};

/// Binding for a hash key with one JSON value per field.
pub struct Hash<'redis, R: 'redis, T> {
    redis: &'redis mut R,
    key: Cow<'static, str>,
    __phantom: PhantomData<T>,
}

impl<'redis, R, T> RedisTypeTrait<'redis, R> for Hash<'redis, R, T> {
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

impl<'redis, R, T> Hash<'redis, R, T>
where
    R: redis::aio::ConnectionLike + Send + Sync,
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    pub async fn exists<'arg, F>(&mut self, field: F) -> RedisResult<bool>
    where
        F: ToRedisArgs + Send + Sync + 'arg,
    {
        self.redis.hexists(&*self.key, field).await
    }

    pub async fn set<'arg, RV, F>(
        &mut self, field: F, value: impl Into<Json<T>>,
    ) -> RedisResult<RV>
    where
        F: ToRedisArgs + Send + Sync + 'arg,
        RV: FromRedisValue,
    {
        self.redis.hset(&*self.key, field, value.into()).await
    }

    /// Write several fields in one `HSET`
    ///
    /// ## reference
    /// - [`AsyncCommands::hset_multiple`]
    pub async fn set_multiple<'arg, RV, F>(
        &mut self, entries: &[(F, Json<T>)],
    ) -> RedisResult<RV>
    where
        F: ToRedisArgs + Send + Sync + 'arg,
        RV: FromRedisValue,
    {
        self.redis.hset_multiple(&*self.key, entries).await
    }

    /// Get the corresponding value of the corresponding field in the current
    /// hash
    ///
    /// ## reference
    /// - [`AsyncCommands::hget`]
    pub async fn get<'arg, F>(&mut self, field: F) -> RedisResult<T>
    where
        F: ToRedisArgs + Send + Sync + 'arg,
    {
        let json: Json<T> = self.redis.hget(&*self.key, field).await?;
        Ok(json.inner())
    }

    pub async fn all<K>(&mut self) -> RedisResult<HashMap<K, T>>
    where
        K: FromRedisValue + Eq + std::hash::Hash,
    {
        let map: HashMap<K, Json<T>> = self.redis.hgetall(&*self.key).await?;
        Ok(map.into_iter().map(|(k, v)| (k, v.inner())).collect())
    }

    /// Try to get the corresponding value of the corresponding field in the
    /// current hash. If it does not exist, [`None`] will be returned.
    ///
    /// ## reference
    /// - [`AsyncCommands::hexists`]
    /// - [`AsyncCommands::hget`]
    pub async fn try_get<'arg, F>(
        &mut self, field: F,
    ) -> RedisResult<Option<T>>
    where
        F: ToRedisArgs + Send + Sync + 'arg + Copy,
    {
        Ok(if self.exists(field).await? {
            Some(self.get(field).await?)
        }
        else {
            None
        })
    }

    /// Try to delete the corresponding value of the corresponding field in
    /// the current hash
    ///
    /// ## reference
    /// - [`AsyncCommands::hdel`]
    pub async fn remove<'arg, RV, F>(&mut self, field: F) -> RedisResult<RV>
    where
        F: ToRedisArgs + Send + Sync + 'arg,
        RV: FromRedisValue,
    {
        self.redis.hdel(&*self.key, field).await
    }

    /// Delete the whole hash
    ///
    /// ## reference
    /// - [`AsyncCommands::del`]
    pub async fn clear<RV>(&mut self) -> RedisResult<RV>
    where
        RV: FromRedisValue,
    {
        self.redis.del(&*self.key).await
    }
}
