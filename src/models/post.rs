use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub post_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub post_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// A blog post as returned by the backend. `author` is optional because
/// some mutation responses omit it; the blog store backfills it from the
/// cached copy (see `BlogState::merge_updated_post`).
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub status: PostStatus,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reading_time: u32,
}

impl Post {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.as_ref().map(|a| a.id) == Some(user.id)
    }
}

/// Fields accepted by `POST /blog/posts/`. The optional `featured_image`
/// drives the JSON-vs-multipart encoding decision (see `services::blog_api`).
#[derive(Clone, PartialEq, Debug)]
pub struct CreatePostData {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub category_id: Option<u64>,
    pub tag_ids: Vec<u64>,
    pub featured_image: Option<web_sys::File>,
}

/// Fields accepted by `PUT /blog/posts/{id}/`; everything optional.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct UpdatePostData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub category_id: Option<u64>,
    pub tag_ids: Option<Vec<u64>>,
    pub featured_image: Option<web_sys::File>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_without_author_deserializes() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "T",
            "slug": "t",
            "status": "draft"
        }))
        .unwrap();
        assert!(post.author.is_none());
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(PostStatus::Published).unwrap(),
            serde_json::json!("published")
        );
    }
}
