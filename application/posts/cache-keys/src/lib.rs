use post_models::PostView;
use redis_connection::redis_key;

redis_key!(hash PostBySlugCacheKey::<PostView> => "post");

// Structured page key: every component sits behind its own label and none
// of them can contain a colon (page and limit are numeric, status is a
// closed enum token, category is a hex object id or empty), so
// differently-filtered or differently-sized pages can never collide. Each
// key holds exactly one page window, replaced wholesale on repopulation.
redis_key!(list PostPageCacheKey::<PostView> => "posts:page:{}:limit:{}:status:{}:category:{}"[page: i64, limit: i64, status: str, category: str]);

#[cfg(test)]
mod tests {
    use redis_connection::CacheKey;

    use super::*;

    #[test]
    fn test_post_hash_key_is_fixed() {
        assert_eq!(PostBySlugCacheKey.get_key(), "post");
    }

    #[test]
    fn test_page_key_composition() {
        let key = PostPageCacheKey.get_key_with_args((
            &2,
            &10,
            "visible",
            "66b1a7f3a1b2c3d4e5f60718",
        ));
        assert_eq!(
            key,
            "posts:page:2:limit:10:status:visible:category:66b1a7f3a1b2c3d4e5f60718"
        );
    }

    #[test]
    fn test_page_key_empty_category_does_not_collide() {
        let a = PostPageCacheKey.get_key_with_args((&2, &10, "visible", ""));
        let b = PostPageCacheKey.get_key_with_args((&21, &10, "visible", ""));
        assert_ne!(a, b);
        assert_eq!(a, "posts:page:2:limit:10:status:visible:category:");
    }

    #[test]
    fn test_page_key_separates_limits() {
        let a = PostPageCacheKey.get_key_with_args((&1, &10, "visible", ""));
        let b = PostPageCacheKey.get_key_with_args((&1, &30, "visible", ""));
        assert_ne!(a, b);
    }
}
