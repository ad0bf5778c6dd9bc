use mongo_connection::bson::{DateTime, Document, doc, oid::ObjectId};

use crate::mongo::TestMongoContainer;

/// Inserts a user document and returns its id.
pub async fn create_test_user(
    mongo: &TestMongoContainer, username: &str,
) -> anyhow::Result<ObjectId> {
    let id = ObjectId::new();
    let now = DateTime::now();
    mongo
        .db
        .collection::<Document>("users")
        .insert_one(doc! {
            "_id": id,
            "username": username,
            "email": format!("{username}@example.com"),
            "createdAt": now,
            "updatedAt": now,
        })
        .await?;
    Ok(id)
}

/// Inserts a category document and returns its id.
pub async fn create_test_category(
    mongo: &TestMongoContainer, name: &str,
) -> anyhow::Result<ObjectId> {
    let id = ObjectId::new();
    let now = DateTime::now();
    mongo
        .db
        .collection::<Document>("categories")
        .insert_one(doc! {
            "_id": id,
            "name": name,
            "slug": slug::slugify(name),
            "createdAt": now,
            "updatedAt": now,
        })
        .await?;
    Ok(id)
}

/// Inserts a post document wired to the given author and categories and
/// returns its id.
pub async fn create_test_post(
    mongo: &TestMongoContainer, title: &str, status: &str, author: ObjectId,
    categories: &[ObjectId],
) -> anyhow::Result<ObjectId> {
    let id = ObjectId::new();
    let now = DateTime::now();
    mongo
        .db
        .collection::<Document>("posts")
        .insert_one(doc! {
            "_id": id,
            "title": title,
            "description": format!("{title} body"),
            "photo": "https://example.com/photo.jpg",
            "slug": slug::slugify(title),
            "status": status,
            "author": author,
            "categories": categories.to_vec(),
            "createdAt": now,
            "updatedAt": now,
        })
        .await?;
    Ok(id)
}
