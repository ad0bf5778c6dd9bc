use post_models::{Paging, PostFilter};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GetPostBySlugQuery {
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub filter: PostFilter,
    #[serde(default)]
    pub paging: Paging,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostsByCategoryQuery {
    pub category_slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomPostsQuery {
    pub n: usize,
}

impl RandomPostsQuery {
    /// A non-positive sample size falls back to the default surface size.
    pub fn normalized(mut self) -> Self {
        if self.n == 0 {
            self.n = 4;
        }
        self
    }
}
