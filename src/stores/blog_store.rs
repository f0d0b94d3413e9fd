// ============================================================================
// BLOG STORE - post/category/tag cache and mutation orchestration
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{
    Category, CreatePostData, Paginated, Pagination, Post, PostStatus, Tag, UpdatePostData,
};
use crate::services::{ApiClient, ApiError, PostQuery};
use crate::state::{ReactiveState, SubscriptionId};
use crate::stores::ToastStore;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Draft,
    Published,
}

impl StatusFilter {
    fn to_status(self) -> Option<PostStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Draft => Some(PostStatus::Draft),
            StatusFilter::Published => Some(PostStatus::Published),
        }
    }
}

/// Pure client-side filter state. Changing any field resets the pagination
/// cursor; none of the setters fetch — the view layer re-queries.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Filters {
    pub search: String,
    pub category: Option<u64>,
    pub tag: Option<u64>,
    pub status: StatusFilter,
}

impl Filters {
    pub fn to_query(&self, page: u32) -> PostQuery {
        PostQuery {
            page,
            search: if self.search.trim().is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
            category: self.category,
            tag: self.tag,
            status: self.status.to_status(),
        }
    }
}

/// All content state owned by the blog store.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BlogState {
    pub posts: Vec<Post>,
    pub featured_posts: Vec<Post>,
    pub my_posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub current_post: Option<Post>,
    pub is_loading: bool,
    pub is_creating: bool,
    pub is_updating: bool,
    pub is_deleting: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub filters: Filters,
}

impl BlogState {
    fn apply_posts_page(&mut self, page: Paginated<Post>) {
        self.pagination = Pagination::from_links(page.count, page.next, page.previous);
        self.posts = page.results;
        self.is_loading = false;
    }

    fn apply_my_posts_page(&mut self, page: Paginated<Post>) {
        self.pagination = Pagination::from_links(page.count, page.next, page.previous);
        self.my_posts = page.results;
        self.is_loading = false;
    }

    /// Optimistic insert after a successful create: the new post leads both
    /// the general and the my-posts collections, no re-fetch.
    fn insert_created(&mut self, post: Post) {
        self.posts.insert(0, post.clone());
        self.my_posts.insert(0, post);
        self.is_creating = false;
    }

    /// Replace `id` in every collection that holds it. If the response
    /// omitted the author, the previously cached author survives the merge
    /// so a partial API response cannot lose byline data.
    fn merge_updated_post(&mut self, id: u64, mut updated: Post) {
        if updated.author.is_none() {
            updated.author = self.cached_author(id);
        }

        let replace = |post: &mut Post| {
            if post.id == id {
                *post = updated.clone();
            }
        };
        self.posts.iter_mut().for_each(replace);
        self.my_posts.iter_mut().for_each(replace);
        self.featured_posts.iter_mut().for_each(replace);
        if self.current_post.as_ref().map(|p| p.id) == Some(id) {
            self.current_post = Some(updated);
        }
        self.is_updating = false;
    }

    fn cached_author(&self, id: u64) -> Option<crate::models::User> {
        self.current_post
            .iter()
            .chain(self.posts.iter())
            .chain(self.my_posts.iter())
            .chain(self.featured_posts.iter())
            .find(|p| p.id == id)
            .and_then(|p| p.author.clone())
    }

    fn remove_post(&mut self, id: u64) {
        self.posts.retain(|p| p.id != id);
        self.my_posts.retain(|p| p.id != id);
        self.featured_posts.retain(|p| p.id != id);
        if self.current_post.as_ref().map(|p| p.id) == Some(id) {
            self.current_post = None;
        }
        self.is_deleting = false;
    }

    /// Status-only transition, applied to every collection without waiting
    /// for a re-fetch.
    fn apply_status(&mut self, id: u64, status: PostStatus) {
        let apply = |post: &mut Post| {
            if post.id == id {
                post.status = status;
            }
        };
        self.posts.iter_mut().for_each(apply);
        self.my_posts.iter_mut().for_each(apply);
        self.featured_posts.iter_mut().for_each(apply);
        if let Some(post) = self.current_post.as_mut() {
            if post.id == id {
                post.status = status;
            }
        }
    }

    fn reset_page(&mut self) {
        self.pagination.current_page = 1;
    }
}

/// Monotonic request fences, one per state slot that a fetch can replace.
/// A response is only applied while its epoch is still the latest issued
/// for that slot, so a slow stale request can never clobber fresher state.
fn bump(epoch: &Cell<u64>) -> u64 {
    let next = epoch.get().wrapping_add(1);
    epoch.set(next);
    next
}

fn is_current(epoch: &Cell<u64>, issued: u64) -> bool {
    epoch.get() == issued
}

#[derive(Clone)]
pub struct BlogStore {
    api: ApiClient,
    toasts: ToastStore,
    state: ReactiveState<BlogState>,
    posts_epoch: Rc<Cell<u64>>,
    my_posts_epoch: Rc<Cell<u64>>,
    current_post_epoch: Rc<Cell<u64>>,
}

impl PartialEq for BlogStore {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state)
    }
}

impl BlogStore {
    pub fn new(api: ApiClient, toasts: ToastStore) -> Self {
        Self {
            api,
            toasts,
            state: ReactiveState::new(BlogState::default()),
            posts_epoch: Rc::new(Cell::new(0)),
            my_posts_epoch: Rc::new(Cell::new(0)),
            current_post_epoch: Rc::new(Cell::new(0)),
        }
    }

    pub fn snapshot(&self) -> BlogState {
        self.state.get_cloned()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id)
    }

    /// Query for `page` under the currently active filters.
    pub fn query_for_page(&self, page: u32) -> PostQuery {
        self.state.with(|s| s.filters.to_query(page))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Replace the posts collection and pagination cursor with one page of
    /// results. Responses superseded by a newer request are discarded.
    pub async fn fetch_posts(&self, query: &PostQuery) -> Result<(), ApiError> {
        let epoch = bump(&self.posts_epoch);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.list_posts(query).await {
            Ok(page) => {
                if !is_current(&self.posts_epoch, epoch) {
                    log::info!("⚠️ Discarding stale posts response (page {})", query.page);
                    return Ok(());
                }
                log::info!("📋 Loaded {} posts (of {})", page.results.len(), page.count);
                self.state.update(|s| s.apply_posts_page(page));
                Ok(())
            }
            Err(err) => {
                if is_current(&self.posts_epoch, epoch) {
                    self.state.update(|s| {
                        s.error = Some(err.user_message());
                        s.is_loading = false;
                    });
                }
                Err(err)
            }
        }
    }

    pub async fn fetch_my_posts(&self, query: &PostQuery) -> Result<(), ApiError> {
        let epoch = bump(&self.my_posts_epoch);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.my_posts(query).await {
            Ok(page) => {
                if !is_current(&self.my_posts_epoch, epoch) {
                    log::info!("⚠️ Discarding stale my-posts response");
                    return Ok(());
                }
                self.state.update(|s| s.apply_my_posts_page(page));
                Ok(())
            }
            Err(err) => {
                if is_current(&self.my_posts_epoch, epoch) {
                    self.state.update(|s| {
                        s.error = Some(err.user_message());
                        s.is_loading = false;
                    });
                }
                Err(err)
            }
        }
    }

    /// Browse a category through its dedicated endpoint; lands in the same
    /// posts slot as the filtered listing.
    pub async fn fetch_category_posts(&self, id: u64, page: u32) -> Result<(), ApiError> {
        let epoch = bump(&self.posts_epoch);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.category_posts(id, page).await {
            Ok(page) => {
                if !is_current(&self.posts_epoch, epoch) {
                    return Ok(());
                }
                self.state.update(|s| s.apply_posts_page(page));
                Ok(())
            }
            Err(err) => {
                if is_current(&self.posts_epoch, epoch) {
                    self.state.update(|s| {
                        s.error = Some(err.user_message());
                        s.is_loading = false;
                    });
                }
                Err(err)
            }
        }
    }

    pub async fn fetch_tag_posts(&self, id: u64, page: u32) -> Result<(), ApiError> {
        let epoch = bump(&self.posts_epoch);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.tag_posts(id, page).await {
            Ok(page) => {
                if !is_current(&self.posts_epoch, epoch) {
                    return Ok(());
                }
                self.state.update(|s| s.apply_posts_page(page));
                Ok(())
            }
            Err(err) => {
                if is_current(&self.posts_epoch, epoch) {
                    self.state.update(|s| {
                        s.error = Some(err.user_message());
                        s.is_loading = false;
                    });
                }
                Err(err)
            }
        }
    }

    /// Independent read-through caches; unaffected by filter state.
    pub async fn fetch_featured_posts(&self) -> Result<(), ApiError> {
        match self.api.featured_posts().await {
            Ok(posts) => {
                self.state.update(|s| s.featured_posts = posts);
                Ok(())
            }
            Err(err) => {
                log::warn!("⚠️ Failed to fetch featured posts: {:?}", err);
                Err(err)
            }
        }
    }

    pub async fn fetch_categories(&self) -> Result<(), ApiError> {
        match self.api.categories().await {
            Ok(categories) => {
                self.state.update(|s| s.categories = categories);
                Ok(())
            }
            Err(err) => {
                log::warn!("⚠️ Failed to fetch categories: {:?}", err);
                Err(err)
            }
        }
    }

    pub async fn fetch_tags(&self) -> Result<(), ApiError> {
        match self.api.tags().await {
            Ok(tags) => {
                self.state.update(|s| s.tags = tags);
                Ok(())
            }
            Err(err) => {
                log::warn!("⚠️ Failed to fetch tags: {:?}", err);
                Err(err)
            }
        }
    }

    /// Populate the current-post slot for the detail view.
    pub async fn fetch_post(&self, id: u64) -> Result<(), ApiError> {
        let epoch = bump(&self.current_post_epoch);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.get_post(id).await {
            Ok(post) => {
                if !is_current(&self.current_post_epoch, epoch) {
                    return Ok(());
                }
                self.state.update(|s| {
                    s.current_post = Some(post);
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                self.apply_current_post_failure(epoch, &err);
                Err(err)
            }
        }
    }

    /// Slug lookup for direct navigation: the listing cache may not hold
    /// the requested post.
    pub async fn fetch_post_by_slug(&self, slug: &str) -> Result<(), ApiError> {
        let epoch = bump(&self.current_post_epoch);
        log::info!("🔍 Fetching post by slug: {}", slug);
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.get_post_by_slug(slug).await {
            Ok(post) => {
                if !is_current(&self.current_post_epoch, epoch) {
                    return Ok(());
                }
                self.state.update(|s| {
                    s.current_post = Some(post);
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                self.apply_current_post_failure(epoch, &err);
                Err(err)
            }
        }
    }

    fn apply_current_post_failure(&self, epoch: u64, err: &ApiError) {
        if !is_current(&self.current_post_epoch, epoch) {
            return;
        }
        self.state.update(|s| {
            // "Post missing" is a first-class empty state for detail views.
            s.current_post = None;
            s.error = Some(err.user_message());
            s.is_loading = false;
        });
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub async fn create_post(&self, data: &CreatePostData) -> Result<Post, ApiError> {
        self.state.update(|s| {
            s.is_creating = true;
            s.error = None;
        });

        match self.api.create_post(data).await {
            Ok(post) => {
                log::info!("📝 Created post #{} ({})", post.id, post.slug);
                self.state.update(|s| s.insert_created(post.clone()));
                self.toasts.success("Post created successfully!");
                Ok(post)
            }
            Err(err) => {
                self.state.update(|s| {
                    s.error = Some(err.user_message());
                    s.is_creating = false;
                });
                Err(err)
            }
        }
    }

    pub async fn update_post(&self, id: u64, data: &UpdatePostData) -> Result<(), ApiError> {
        self.state.update(|s| {
            s.is_updating = true;
            s.error = None;
        });

        match self.api.update_post(id, data).await {
            Ok(post) => {
                log::info!("📝 Updated post #{}", id);
                self.state.update(|s| s.merge_updated_post(id, post));
                self.toasts.success("Post updated successfully!");
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| {
                    s.error = Some(err.user_message());
                    s.is_updating = false;
                });
                Err(err)
            }
        }
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        self.state.update(|s| {
            s.is_deleting = true;
            s.error = None;
        });

        match self.api.delete_post(id).await {
            Ok(()) => {
                log::info!("🗑️ Deleted post #{}", id);
                self.state.update(|s| s.remove_post(id));
                self.toasts.success("Post deleted successfully!");
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| {
                    s.error = Some(err.user_message());
                    s.is_deleting = false;
                });
                Err(err)
            }
        }
    }

    pub async fn publish_post(&self, id: u64) -> Result<(), ApiError> {
        match self.api.publish_post(id).await {
            Ok(()) => {
                self.state.update(|s| s.apply_status(id, PostStatus::Published));
                self.toasts.success("Post published successfully!");
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| s.error = Some(err.user_message()));
                Err(err)
            }
        }
    }

    pub async fn unpublish_post(&self, id: u64) -> Result<(), ApiError> {
        match self.api.unpublish_post(id).await {
            Ok(()) => {
                self.state.update(|s| s.apply_status(id, PostStatus::Draft));
                self.toasts.success("Post unpublished successfully!");
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| s.error = Some(err.user_message()));
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------
    // Setters only mutate filter state and reset the cursor; the view
    // layer is responsible for issuing the follow-up fetch.

    pub fn set_search(&self, search: String) {
        self.state.update(|s| {
            s.filters.search = search;
            s.reset_page();
        });
    }

    pub fn set_category_filter(&self, category: Option<u64>) {
        self.state.update(|s| {
            s.filters.category = category;
            s.reset_page();
        });
    }

    pub fn set_tag_filter(&self, tag: Option<u64>) {
        self.state.update(|s| {
            s.filters.tag = tag;
            s.reset_page();
        });
    }

    pub fn set_status_filter(&self, status: StatusFilter) {
        self.state.update(|s| {
            s.filters.status = status;
            s.reset_page();
        });
    }

    pub fn clear_filters(&self) {
        self.state.update(|s| {
            s.filters = Filters::default();
            s.reset_page();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> crate::models::User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": format!("user{}", id),
            "email": format!("user{}@example.com", id),
        }))
        .unwrap()
    }

    fn post(id: u64, status: PostStatus) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            content: "C".into(),
            excerpt: String::new(),
            author: Some(user(1)),
            category: None,
            tags: Vec::new(),
            status,
            featured_image: None,
            created_at: None,
            updated_at: None,
            published_at: None,
            reading_time: 1,
        }
    }

    fn page(posts: Vec<Post>) -> Paginated<Post> {
        Paginated {
            count: posts.len() as u64,
            next: None,
            previous: None,
            results: posts,
        }
    }

    #[test]
    fn empty_result_set_is_a_valid_page() {
        let mut state = BlogState::default();
        state.is_loading = true;
        state.apply_posts_page(page(Vec::new()));
        assert!(state.posts.is_empty());
        assert_eq!(state.pagination.count, 0);
        assert_eq!(state.pagination.current_page, 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn create_then_publish_yields_one_published_post() {
        let mut state = BlogState::default();
        let draft = post(7, PostStatus::Draft);
        state.insert_created(draft);
        state.apply_status(7, PostStatus::Published);

        let published: Vec<_> = state
            .posts
            .iter()
            .chain(state.my_posts.iter())
            .filter(|p| p.id == 7 && p.status == PostStatus::Published)
            .collect();
        assert_eq!(published.len(), 2); // once per collection
        assert_eq!(state.posts.iter().filter(|p| p.id == 7).count(), 1);
        assert_eq!(state.my_posts.iter().filter(|p| p.id == 7).count(), 1);
    }

    #[test]
    fn merge_preserves_cached_author_when_response_omits_it() {
        let mut state = BlogState::default();
        state.posts = vec![post(3, PostStatus::Published)];
        state.current_post = Some(post(3, PostStatus::Published));

        let mut updated = post(3, PostStatus::Published);
        updated.title = "New title".into();
        updated.author = None;
        state.merge_updated_post(3, updated);

        assert_eq!(state.posts[0].title, "New title");
        assert_eq!(state.posts[0].author, Some(user(1)));
        assert_eq!(
            state.current_post.as_ref().and_then(|p| p.author.clone()),
            Some(user(1))
        );
    }

    #[test]
    fn merge_replaces_author_when_response_carries_one() {
        let mut state = BlogState::default();
        state.posts = vec![post(3, PostStatus::Published)];

        let mut updated = post(3, PostStatus::Published);
        updated.author = Some(user(2));
        state.merge_updated_post(3, updated);
        assert_eq!(state.posts[0].author, Some(user(2)));
    }

    #[test]
    fn delete_purges_every_collection_and_nulls_current() {
        let mut state = BlogState::default();
        state.posts = vec![post(42, PostStatus::Published), post(2, PostStatus::Draft)];
        state.my_posts = vec![post(42, PostStatus::Published)];
        state.featured_posts = vec![post(42, PostStatus::Published)];
        state.current_post = Some(post(42, PostStatus::Published));

        state.remove_post(42);

        assert!(state.posts.iter().all(|p| p.id != 42));
        assert!(state.my_posts.is_empty());
        assert!(state.featured_posts.is_empty());
        assert!(state.current_post.is_none());
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn delete_of_other_post_keeps_current() {
        let mut state = BlogState::default();
        state.current_post = Some(post(1, PostStatus::Published));
        state.remove_post(42);
        assert!(state.current_post.is_some());
    }

    #[test]
    fn filter_changes_reset_the_cursor() {
        let mut state = BlogState::default();
        state.pagination.current_page = 5;
        state.filters.search = "rust".into();
        state.reset_page();
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn clear_filters_is_idempotent() {
        let mut state = BlogState::default();
        state.filters = Filters {
            search: "x".into(),
            category: Some(1),
            tag: Some(2),
            status: StatusFilter::Draft,
        };
        state.pagination.current_page = 3;

        state.filters = Filters::default();
        state.reset_page();
        let once = state.clone();

        state.filters = Filters::default();
        state.reset_page();
        assert_eq!(state, once);
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn stale_responses_are_fenced_off() {
        let epoch = Cell::new(0u64);
        let first = bump(&epoch);
        let second = bump(&epoch);

        // The slower first request resolves after the second was issued.
        assert!(!is_current(&epoch, first));
        assert!(is_current(&epoch, second));
    }

    #[test]
    fn filters_translate_to_query_parameters() {
        let filters = Filters {
            search: "  ".into(),
            category: Some(4),
            tag: None,
            status: StatusFilter::Published,
        };
        let query = filters.to_query(2);
        assert_eq!(query.page, 2);
        assert_eq!(query.search, None);
        assert_eq!(query.category, Some(4));
        assert_eq!(query.status, Some(PostStatus::Published));
    }
}
