pub mod mongo;
pub mod redis;
pub mod seed;

pub use mongo::TestMongoContainer;
pub use redis::TestRedisContainer;
pub use seed::{create_test_category, create_test_post, create_test_user};
