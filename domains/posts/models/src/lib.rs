pub mod filter;
pub mod posts;

pub use filter::{Paging, PostFilter};
pub use posts::{
    CreatePostParams, InvalidPostStatus, Post, PostStatus, PostView,
    RecommendationEntry,
};
