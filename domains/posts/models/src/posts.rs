use std::{fmt, str::FromStr};

use category_models::Category;
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of post visibility states. Stored in the primary store as the
/// lowercase token, which is also what filter queries match against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Visible,
    Hidden,
    Deleted,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] =
        [PostStatus::Visible, PostStatus::Hidden, PostStatus::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Visible => "visible",
            PostStatus::Hidden => "hidden",
            PostStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = InvalidPostStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visible" => Ok(PostStatus::Visible),
            "hidden" => Ok(PostStatus::Hidden),
            "deleted" => Ok(PostStatus::Deleted),
            other => {
                Err(InvalidPostStatus {
                    value: other.to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid post status {value:?}, must be one of: visible, hidden, deleted")]
pub struct InvalidPostStatus {
    pub value: String,
}

/// Post document as stored: author and categories are id references,
/// resolved only at read time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub photo: String,
    pub author: ObjectId,
    pub categories: Vec<ObjectId>,
    pub slug: String,
    pub status: PostStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

/// Fully-joined read model: author resolved to a username, category ids to
/// category documents. This is the unit cached for slug lookups and list
/// pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub photo: String,
    pub author: String,
    pub categories: Vec<Category>,
    pub slug: String,
    pub status: PostStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

/// Minimal projection of a visible post for "related content" surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub title: String,
    pub slug: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePostParams {
    pub title: String,
    pub description: String,
    pub photo: String,
    pub author: ObjectId,
    pub categories: Vec<ObjectId>,
    pub slug: String,
    pub status: PostStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> PostView {
        PostView {
            id: ObjectId::new(),
            title: "Hello World".into(),
            description: "first post".into(),
            photo: "hello.jpg".into(),
            author: "alice".into(),
            categories: vec![Category {
                id: ObjectId::new(),
                name: "Rust".into(),
                slug: "rust".into(),
                created_at: DateTime::now(),
                updated_at: DateTime::now(),
            }],
            slug: "hello-world".into(),
            status: PostStatus::Visible,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_post_view_json_round_trip() {
        let view = sample_view();
        let json = serde_json::to_vec(&view).unwrap();
        let decoded: PostView = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, view);
    }

    #[test]
    fn test_status_parses_all_tokens() {
        for status in PostStatus::ALL {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_token() {
        let err = "draft".parse::<PostStatus>().unwrap_err();
        assert_eq!(err.value, "draft");
        assert!(err.to_string().contains("visible, hidden, deleted"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PostStatus::Visible).unwrap();
        assert_eq!(json, r#""visible""#);
    }
}
