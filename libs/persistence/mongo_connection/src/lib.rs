use mongodb::{Client, Collection, Database, error::Error as MongoError};
use tracing::{info, instrument};

pub mod config;

pub use config::MongoDbConfig;
pub use mongodb::{self, bson};

/// Shared handle to the primary store. Constructed once at startup and
/// cloned into every DAO; cloning is cheap, the driver shares its
/// connection pool underneath.
#[derive(Clone)]
pub struct MongoConnect {
    db: Database,
}

impl MongoConnect {
    pub fn new(db: Database) -> Self { Self { db } }

    pub fn database(&self) -> &Database { &self.db }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }
}

#[instrument(skip_all, name = "connect-mongo")]
pub async fn connect_mongo_db(
    config: &MongoDbConfig,
) -> Result<MongoConnect, MongoError> {
    let client = Client::with_uri_str(&config.uri).await?;

    info!(mongo.uri = %config.uri, mongo.database = %config.database);

    Ok(MongoConnect::new(client.database(&config.database)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_db_config_default() {
        let json = r#"{}"#;
        let config: MongoDbConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.uri, "mongodb://127.0.0.1:27017");
        assert_eq!(config.database, "blog");
    }
}
