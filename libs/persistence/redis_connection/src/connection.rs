use std::sync::Arc;

use deadpool_redis::{Connection, Pool, PoolError};

/// Shared handle to the Redis pool. Constructed once at startup and cloned
/// into every component that talks to the cache; there is no process-global
/// fallback, callers receive the handle explicitly.
#[derive(Clone)]
pub struct RedisConnectionManager {
    pool: Arc<Pool>,
}

impl RedisConnectionManager {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn get_connection(&self) -> Result<Connection, PoolError> {
        self.pool.get().await
    }
}
