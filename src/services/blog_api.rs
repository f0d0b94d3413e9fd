// ============================================================================
// BLOG API - typed wrappers for the /blog/ endpoints
// ============================================================================

use serde_json::json;

use crate::models::{
    Category, CreatePostData, ListResponse, Paginated, Post, PostStatus, Tag, UpdatePostData,
};
use crate::services::error::ApiError;
use crate::services::http::{ApiClient, EncodedBody};

/// Query parameters accepted by the post list endpoints.
#[derive(Clone, PartialEq, Debug)]
pub struct PostQuery {
    pub page: u32,
    pub search: Option<String>,
    pub category: Option<u64>,
    pub tag: Option<u64>,
    pub status: Option<PostStatus>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            category: None,
            tag: None,
            status: None,
        }
    }
}

impl PostQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(search) = self.search.as_deref() {
            let search = search.trim();
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(tag) = self.tag {
            pairs.push(("tag", tag.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

impl ApiClient {
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Paginated<Post>, ApiError> {
        self.get_with_query("/blog/posts/", &query.to_pairs(), false)
            .await
    }

    pub async fn my_posts(&self, query: &PostQuery) -> Result<Paginated<Post>, ApiError> {
        self.get_with_query("/blog/posts/my_posts/", &query.to_pairs(), false)
            .await
    }

    /// Background cache refresh; failures stay out of the user's face.
    pub async fn featured_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get::<ListResponse<Post>>("/blog/posts/featured/", true)
            .await
            .map(ListResponse::into_items)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get::<ListResponse<Category>>("/blog/categories/", true)
            .await
            .map(ListResponse::into_items)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get::<ListResponse<Tag>>("/blog/tags/", true)
            .await
            .map(ListResponse::into_items)
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, ApiError> {
        self.get(&format!("/blog/posts/{}/", id), false).await
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post, ApiError> {
        self.get(&format!("/blog/posts/by-slug/{}/", slug), false)
            .await
    }

    pub async fn create_post(&self, data: &CreatePostData) -> Result<Post, ApiError> {
        let body = encode_create_post(data)?;
        self.post_body("/blog/posts/", body, false).await
    }

    pub async fn update_post(&self, id: u64, data: &UpdatePostData) -> Result<Post, ApiError> {
        let body = encode_update_post(data)?;
        self.put_body(&format!("/blog/posts/{}/", id), body, false)
            .await
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/blog/posts/{}/", id), false).await
    }

    pub async fn publish_post(&self, id: u64) -> Result<(), ApiError> {
        self.post_no_content(&format!("/blog/posts/{}/publish/", id), false)
            .await
    }

    pub async fn unpublish_post(&self, id: u64) -> Result<(), ApiError> {
        self.post_no_content(&format!("/blog/posts/{}/unpublish/", id), false)
            .await
    }

    pub async fn category_posts(&self, id: u64, page: u32) -> Result<Paginated<Post>, ApiError> {
        self.get_with_query(
            &format!("/blog/categories/{}/posts/", id),
            &[("page", page.to_string())],
            false,
        )
        .await
    }

    pub async fn tag_posts(&self, id: u64, page: u32) -> Result<Paginated<Post>, ApiError> {
        self.get_with_query(
            &format!("/blog/tags/{}/posts/", id),
            &[("page", page.to_string())],
            false,
        )
        .await
    }
}

/// Encode a create payload: JSON unless a featured image is attached, in
/// which case the whole payload goes out as multipart form data. The same
/// rule applies to updates, so both mutations share one encoding decision.
pub fn encode_create_post(data: &CreatePostData) -> Result<EncodedBody, ApiError> {
    match &data.featured_image {
        Some(file) => {
            let form = new_form_data()?;
            append_field(&form, "title", &data.title)?;
            append_field(&form, "content", &data.content)?;
            if let Some(excerpt) = &data.excerpt {
                append_field(&form, "excerpt", excerpt)?;
            }
            append_field(&form, "status", data.status.as_str())?;
            if let Some(category_id) = data.category_id {
                append_field(&form, "category_id", &category_id.to_string())?;
            }
            for tag_id in &data.tag_ids {
                append_field(&form, "tag_ids", &tag_id.to_string())?;
            }
            form.append_with_blob("featured_image", file)
                .map_err(|_| ApiError::Decode("failed to attach featured image".into()))?;
            Ok(EncodedBody::Multipart(form))
        }
        None => Ok(EncodedBody::Json(create_json_body(data))),
    }
}

pub fn encode_update_post(data: &UpdatePostData) -> Result<EncodedBody, ApiError> {
    match &data.featured_image {
        Some(file) => {
            let form = new_form_data()?;
            if let Some(title) = &data.title {
                append_field(&form, "title", title)?;
            }
            if let Some(content) = &data.content {
                append_field(&form, "content", content)?;
            }
            if let Some(excerpt) = &data.excerpt {
                append_field(&form, "excerpt", excerpt)?;
            }
            if let Some(status) = data.status {
                append_field(&form, "status", status.as_str())?;
            }
            if let Some(category_id) = data.category_id {
                append_field(&form, "category_id", &category_id.to_string())?;
            }
            if let Some(tag_ids) = &data.tag_ids {
                for tag_id in tag_ids {
                    append_field(&form, "tag_ids", &tag_id.to_string())?;
                }
            }
            form.append_with_blob("featured_image", file)
                .map_err(|_| ApiError::Decode("failed to attach featured image".into()))?;
            Ok(EncodedBody::Multipart(form))
        }
        None => Ok(EncodedBody::Json(update_json_body(data))),
    }
}

fn new_form_data() -> Result<web_sys::FormData, ApiError> {
    web_sys::FormData::new().map_err(|_| ApiError::Decode("failed to build form data".into()))
}

fn append_field(form: &web_sys::FormData, name: &str, value: &str) -> Result<(), ApiError> {
    form.append_with_str(name, value)
        .map_err(|_| ApiError::Decode(format!("failed to encode field {}", name)))
}

fn create_json_body(data: &CreatePostData) -> serde_json::Value {
    let mut body = json!({
        "title": data.title,
        "content": data.content,
        "status": data.status,
        "tag_ids": data.tag_ids,
    });
    if let Some(excerpt) = &data.excerpt {
        body["excerpt"] = json!(excerpt);
    }
    if let Some(category_id) = data.category_id {
        body["category_id"] = json!(category_id);
    }
    body
}

fn update_json_body(data: &UpdatePostData) -> serde_json::Value {
    let mut body = json!({});
    if let Some(title) = &data.title {
        body["title"] = json!(title);
    }
    if let Some(content) = &data.content {
        body["content"] = json!(content);
    }
    if let Some(excerpt) = &data.excerpt {
        body["excerpt"] = json!(excerpt);
    }
    if let Some(status) = data.status {
        body["status"] = json!(status);
    }
    if let Some(category_id) = data.category_id {
        body["category_id"] = json!(category_id);
    }
    if let Some(tag_ids) = &data.tag_ids {
        body["tag_ids"] = json!(tag_ids);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_blank_search_and_absent_filters() {
        let query = PostQuery {
            page: 2,
            search: Some("  rust  ".into()),
            category: Some(3),
            tag: None,
            status: Some(PostStatus::Draft),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "2".to_string()),
                ("search", "rust".to_string()),
                ("category", "3".to_string()),
                ("status", "draft".to_string()),
            ]
        );

        let query = PostQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.to_pairs(), vec![("page", "1".to_string())]);
    }

    #[test]
    fn create_without_image_encodes_as_json() {
        let data = CreatePostData {
            title: "T".into(),
            content: "C".into(),
            excerpt: None,
            status: PostStatus::Draft,
            category_id: Some(9),
            tag_ids: vec![1, 2],
            featured_image: None,
        };
        match encode_create_post(&data) {
            Ok(EncodedBody::Json(body)) => {
                assert_eq!(
                    body,
                    json!({
                        "title": "T",
                        "content": "C",
                        "status": "draft",
                        "tag_ids": [1, 2],
                        "category_id": 9,
                    })
                );
            }
            _ => panic!("expected JSON body"),
        }
    }

    #[test]
    fn update_body_only_carries_provided_fields() {
        let data = UpdatePostData {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        assert_eq!(update_json_body(&data), json!({"status": "published"}));
    }
}
