use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::blog::filter_bar::FilterBar;
use crate::components::blog::pagination_controls::PaginationControls;
use crate::components::blog::post_card::PostCard;
use crate::components::blog::search_bar::SearchBar;
use crate::hooks::use_blog;

/// The browsing page: search, filters, paged post grid.
#[function_component(PostListView)]
pub fn post_list_view() -> Html {
    let handle = use_blog();

    // Initial load: first page under current filters, plus the reference
    // data the filter bar needs.
    {
        let store = handle.store.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let query = store.query_for_page(1);
                let _ = store.fetch_posts(&query).await;
                let _ = store.fetch_categories().await;
                let _ = store.fetch_tags().await;
            });
            || ()
        });
    }

    let on_page = {
        let store = handle.store.clone();
        Callback::from(move |page: u32| {
            let store = store.clone();
            spawn_local(async move {
                let query = store.query_for_page(page);
                let _ = store.fetch_posts(&query).await;
            });
        })
    };

    html! {
        <div class="post-list-screen">
            <div class="post-list-controls">
                <SearchBar />
                <FilterBar />
            </div>

            {
                if let Some(message) = &handle.blog.error {
                    html! { <div class="error-banner">{ message }</div> }
                } else {
                    html! {}
                }
            }

            {
                if handle.blog.is_loading {
                    html! { <div class="loading">{"Loading posts..."}</div> }
                } else if handle.blog.posts.is_empty() {
                    html! {
                        <div class="empty-state">
                            <h2>{"No posts found"}</h2>
                            <p>{"Try a different search or clear the filters."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="post-grid">
                            {
                                for handle.blog.posts.iter().map(|post| html! {
                                    <PostCard key={post.id} post={post.clone()} />
                                })
                            }
                        </div>
                    }
                }
            }

            <PaginationControls pagination={handle.blog.pagination.clone()} {on_page} />
        </div>
    }
}
