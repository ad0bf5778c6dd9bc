use mongo_connection::{MongoDbConfig, connect_mongo_db};
use post_dao::PostDao;
use post_recommend::{
    PostChangeListener, RecommendConfig, RecommendationCache,
    RecommendationRefresher,
};
use redis_connection::{
    config::RedisDbConfig, connect_redis_db,
    connection::RedisConnectionManager, pubsub::PubSubConnector,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Initializing connection pools...");

    let mongo_config = MongoDbConfig {
        uri: std::env::var("MONGO_URI")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
        database: std::env::var("MONGO_DATABASE")
            .unwrap_or_else(|_| "blog".to_string()),
    };
    let db = connect_mongo_db(&mongo_config).await?;
    info!("MongoDB connection initialized");

    let redis_config = RedisDbConfig {
        host: std::env::var("REDIS_HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string()),
        port: std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse()
            .unwrap_or(6379),
        db: std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0),
    };
    let redis_pool = connect_redis_db(&redis_config).await?;
    let redis = RedisConnectionManager::new(redis_pool);
    info!("Redis connection pool initialized");

    let recommend_config = RecommendConfig {
        key: std::env::var("RECOMMEND_KEY")
            .unwrap_or_else(|_| "post_recommend".to_string()),
        channel: std::env::var("RECOMMEND_CHANNEL")
            .unwrap_or_else(|_| "post_recom_ch".to_string()),
        sample_size: std::env::var("RECOMMEND_SAMPLE_SIZE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(100),
    };

    let post_dao = PostDao::new(db.clone());
    let cache = RecommendationCache::new(
        redis.clone(),
        recommend_config.key.clone(),
    );
    let refresher = RecommendationRefresher::new(
        post_dao,
        cache,
        recommend_config.sample_size,
    );

    // A cold recommendation hash on boot is survivable; reads fall back to
    // the store until the first successful refresh.
    match refresher.refresh().await {
        Ok(count) => info!("Recommendation cache warmed with {count} posts"),
        Err(e) => warn!("Startup recommendation refresh failed: {e}"),
    }

    let connector = PubSubConnector::new(&redis_config)?;
    let listener = PostChangeListener::new(
        connector,
        recommend_config.channel.clone(),
        refresher,
    );

    info!(
        "Listening for change notifications on {}",
        recommend_config.channel
    );

    tokio::select! {
        _ = listener.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received, stopping listener");
        }
    }

    Ok(())
}
