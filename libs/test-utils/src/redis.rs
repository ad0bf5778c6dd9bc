use std::{
    sync::atomic::{AtomicU8, Ordering},
    time::Duration,
};

use deadpool_redis::{Config, Pool, Runtime};
use redis_connection::connection::RedisConnectionManager;
use tokio::time::sleep;

// Hand each container its own logical database so parallel tests sharing
// one Redis instance cannot see each other's keys.
static DB_COUNTER: AtomicU8 = AtomicU8::new(0);

pub struct TestRedisContainer {
    pub pool: Pool,
    pub connection_string: String,
}

impl TestRedisContainer {
    pub async fn new() -> anyhow::Result<Self> {
        let db = DB_COUNTER.fetch_add(1, Ordering::Relaxed) % 16;
        Self::new_with_connection_string(&format!(
            "redis://localhost:6379/{db}"
        ))
        .await
    }

    pub async fn new_with_connection_string(
        connection_string: &str,
    ) -> anyhow::Result<Self> {
        let connection_string = connection_string.to_string();

        let mut cfg = Config::from_url(&connection_string);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(10));
        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;

        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(mut conn) => {
                    match deadpool_redis::redis::cmd("PING")
                        .query_async::<()>(&mut conn)
                        .await
                    {
                        Ok(_) => break,
                        Err(_) if attempts < 10 => {
                            attempts += 1;
                            sleep(Duration::from_millis(500 * attempts))
                                .await;
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Err(_) if attempts < 10 => {
                    attempts += 1;
                    sleep(Duration::from_millis(500 * attempts)).await;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self {
            pool,
            connection_string,
        })
    }

    pub fn manager(&self) -> RedisConnectionManager {
        RedisConnectionManager::new(self.pool.clone())
    }

    pub async fn get_connection(
        &self,
    ) -> anyhow::Result<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    pub async fn flush_db(&self) -> anyhow::Result<()> {
        let mut conn = self.get_connection().await?;
        deadpool_redis::redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn set_raw(
        &self, key: &str, value: &str,
    ) -> anyhow::Result<()> {
        let mut conn = self.get_connection().await?;
        deadpool_redis::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn key_exists(&self, key: &str) -> anyhow::Result<bool> {
        let mut conn = self.get_connection().await?;
        let exists = deadpool_redis::redis::cmd("EXISTS")
            .arg(key)
            .query_async::<bool>(&mut conn)
            .await?;
        Ok(exists)
    }

    pub async fn hash_len(&self, key: &str) -> anyhow::Result<usize> {
        let mut conn = self.get_connection().await?;
        let len = deadpool_redis::redis::cmd("HLEN")
            .arg(key)
            .query_async::<usize>(&mut conn)
            .await?;
        Ok(len)
    }

    pub async fn publish(
        &self, channel: &str, payload: &str,
    ) -> anyhow::Result<()> {
        let mut conn = self.get_connection().await?;
        deadpool_redis::redis::cmd("PUBLISH")
            .arg(channel)
            .arg(payload)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }
}
