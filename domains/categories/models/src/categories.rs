use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

/// Projection cached under the `all_categories` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCategoryParams {
    pub name: String,
    pub slug: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_summary_json_round_trip() {
        let summary = CategorySummary {
            id: ObjectId::new(),
            name: "Rust".into(),
            slug: "rust".into(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        let decoded: CategorySummary = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, summary);
    }

    #[test]
    fn test_category_summary_list_json_round_trip() {
        let list = vec![
            CategorySummary {
                id: ObjectId::new(),
                name: "Go".into(),
                slug: "go".into(),
            },
            CategorySummary {
                id: ObjectId::new(),
                name: "Databases".into(),
                slug: "databases".into(),
            },
        ];

        let json = serde_json::to_vec(&list).unwrap();
        let decoded: Vec<CategorySummary> =
            serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, list);
    }
}
