use std::{borrow::Cow, marker::PhantomData, time::Duration};

use deadpool_redis::redis::{
    AsyncCommands, FromRedisValue, RedisResult,
};
use serde::{Deserialize, Serialize};

use crate::{type_bind::RedisTypeTrait, value::Json};

/// Binding for a plain string key holding one JSON value.
pub struct Normal<'redis, R, T> {
    redis: &'redis mut R,
    key: Cow<'static, str>,
    __phantom: PhantomData<T>,
}

impl<'redis, R, T> RedisTypeTrait<'redis, R> for Normal<'redis, R, T> {
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

impl<'redis, R, T> Normal<'redis, R, T>
where
    R: redis::aio::ConnectionLike + Send + Sync,
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    /// Determine whether the current value exists
    ///
    /// ## reference
    /// - [`AsyncCommands::exists`]
    pub async fn exists(&mut self) -> RedisResult<bool> {
        self.redis.exists(&*self.key).await
    }

    /// Write the current value
    ///
    /// ## reference
    /// - [`AsyncCommands::set`]
    pub async fn set<RV>(&mut self, value: impl Into<Json<T>>) -> RedisResult<RV>
    where
        RV: FromRedisValue,
    {
        self.redis.set(&*self.key, value.into()).await
    }

    /// Write the value and add expiration
    ///
    /// ## reference
    /// - [`AsyncCommands::set_ex`]
    pub async fn set_with_expire<RV>(
        &mut self, value: impl Into<Json<T>>, duration: Duration,
    ) -> RedisResult<RV>
    where
        RV: FromRedisValue,
    {
        self.redis
            .set_ex(&*self.key, value.into(), duration.as_secs())
            .await
    }

    /// Get the value
    ///
    /// ## reference
    /// - [`AsyncCommands::get`]
    pub async fn get(&mut self) -> RedisResult<T> {
        let json: Json<T> = self.redis.get(&*self.key).await?;
        Ok(json.inner())
    }

    /// Try to get the value, if it does not exist, return [`None`]
    ///
    /// ## reference
    /// - [`AsyncCommands::get`]
    /// - [`AsyncCommands::exists`]
    pub async fn try_get(&mut self) -> RedisResult<Option<T>> {
        Ok(if self.exists().await? {
            Some(self.get().await?)
        }
        else {
            None
        })
    }

    /// Delete the value
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
