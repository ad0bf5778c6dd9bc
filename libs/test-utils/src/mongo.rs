use std::sync::atomic::{AtomicU64, Ordering};

use mongo_connection::{MongoConnect, mongodb::Client};

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TestMongoContainer {
    client: Client,
    db_name: String,
    pub db: MongoConnect,
}

impl TestMongoContainer {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_connection_string("mongodb://localhost:27017").await
    }

    pub async fn new_with_connection_string(
        connection_string: &str,
    ) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(connection_string).await?;
        let db_name = format!(
            "blog_test_{}_{}",
            std::process::id(),
            DB_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let db = MongoConnect::new(client.database(&db_name));
        Ok(Self {
            client,
            db_name,
            db,
        })
    }

    pub async fn drop(self) -> anyhow::Result<()> {
        self.client.database(&self.db_name).drop().await?;
        Ok(())
    }
}
