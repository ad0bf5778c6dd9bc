use std::time::Duration;

use category_models::CategorySummary;
use redis_connection::redis_key;

redis_key!(CategoriesCacheKey::<Vec<CategorySummary>> => "all_categories");

/// The only automatic staleness bound in the whole cache layer.
pub const CATEGORY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[cfg(test)]
mod tests {
    use redis_connection::CacheKey;

    use super::*;

    #[test]
    fn test_category_key_is_fixed() {
        assert_eq!(CategoriesCacheKey.get_key(), "all_categories");
    }
}
