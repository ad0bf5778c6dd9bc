use serde::{Deserialize, Serialize};

use crate::posts::PostStatus;

/// Filter applied to the paginated post listing. `category_id` holds the
/// hex representation of a category id; `None` means no category filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    pub status: PostStatus,
    pub category_id: Option<String>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            status: PostStatus::Visible,
            category_id: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: i64,
    pub limit: i64,
}

impl Default for Paging {
    fn default() -> Self { Self { page: 1, limit: 10 } }
}

impl Paging {
    /// Clamp out-of-range parameters to their defaults: page 1, limit 10
    /// (upper bound 30).
    pub fn normalized(mut self) -> Self {
        if self.page <= 0 {
            self.page = 1;
        }
        if self.limit <= 0 || self.limit > 30 {
            self.limit = 10;
        }
        self
    }

    /// Number of documents skipped by the page window. Saturates instead
    /// of overflowing for absurd page numbers.
    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults_out_of_range_page() {
        let paging = Paging { page: 0, limit: 10 }.normalized();
        assert_eq!(paging.page, 1);

        let paging = Paging { page: -3, limit: 10 }.normalized();
        assert_eq!(paging.page, 1);
    }

    #[test]
    fn test_paging_defaults_out_of_range_limit() {
        let paging = Paging { page: 2, limit: 0 }.normalized();
        assert_eq!(paging.limit, 10);

        let paging = Paging { page: 2, limit: 31 }.normalized();
        assert_eq!(paging.limit, 10);

        let paging = Paging { page: 2, limit: 30 }.normalized();
        assert_eq!(paging.limit, 30);
    }

    #[test]
    fn test_paging_skip_window() {
        let paging = Paging { page: 2, limit: 10 };
        assert_eq!(paging.skip(), 10);

        let paging = Paging { page: 1, limit: 30 };
        assert_eq!(paging.skip(), 0);
    }

    #[test]
    fn test_paging_skip_saturates_on_huge_page() {
        let paging = Paging {
            page: i64::MAX,
            limit: 30,
        };
        assert_eq!(paging.skip(), i64::MAX);
    }
}
