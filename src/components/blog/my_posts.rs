use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::app::Route;
use crate::components::blog::pagination_controls::PaginationControls;
use crate::components::link::Link;
use crate::hooks::use_blog;
use crate::models::PostStatus;
use crate::stores::StatusFilter;

/// The author dashboard: own posts with status filtering and the
/// publish/unpublish/delete quick actions.
#[function_component(MyPostsView)]
pub fn my_posts_view() -> Html {
    let handle = use_blog();

    {
        let store = handle.store.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let query = store.query_for_page(1);
                let _ = store.fetch_my_posts(&query).await;
            });
            || ()
        });
    }

    let on_status_change = {
        let store = handle.store.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let status = match select.value().as_str() {
                "draft" => StatusFilter::Draft,
                "published" => StatusFilter::Published,
                _ => StatusFilter::All,
            };
            store.set_status_filter(status);
            let store = store.clone();
            spawn_local(async move {
                let query = store.query_for_page(1);
                let _ = store.fetch_my_posts(&query).await;
            });
        })
    };

    let on_page = {
        let store = handle.store.clone();
        Callback::from(move |page: u32| {
            let store = store.clone();
            spawn_local(async move {
                let query = store.query_for_page(page);
                let _ = store.fetch_my_posts(&query).await;
            });
        })
    };

    let rows = handle.blog.my_posts.iter().map(|post| {
        let on_toggle_status = {
            let store = handle.store.clone();
            let id = post.id;
            let status = post.status;
            Callback::from(move |_: MouseEvent| {
                let store = store.clone();
                spawn_local(async move {
                    let _ = match status {
                        PostStatus::Draft => store.publish_post(id).await,
                        PostStatus::Published => store.unpublish_post(id).await,
                    };
                });
            })
        };

        let on_delete = {
            let store = handle.store.clone();
            let id = post.id;
            Callback::from(move |_: MouseEvent| {
                let confirmed = web_sys::window()
                    .and_then(|win| win.confirm_with_message("Delete this post?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                let store = store.clone();
                spawn_local(async move {
                    let _ = store.delete_post(id).await;
                });
            })
        };

        html! {
            <div class="my-post-row" key={post.id}>
                <div class="my-post-info">
                    <Link to={Route::PostDetail { slug: post.slug.clone() }}>
                        { post.title.clone() }
                    </Link>
                    {
                        match post.status {
                            PostStatus::Draft => html! {
                                <span class="badge badge-warn">{"draft"}</span>
                            },
                            PostStatus::Published => html! {
                                <span class="badge badge-ok">{"published"}</span>
                            },
                        }
                    }
                </div>
                <div class="my-post-actions">
                    <Link to={Route::EditPost { id: post.id }} class="btn">{"Edit"}</Link>
                    <button class="btn" onclick={on_toggle_status}>
                        {
                            match post.status {
                                PostStatus::Draft => "Publish",
                                PostStatus::Published => "Unpublish",
                            }
                        }
                    </button>
                    <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
                </div>
            </div>
        }
    });

    html! {
        <div class="my-posts-screen">
            <div class="my-posts-header">
                <h1>{"My posts"}</h1>
                <div class="my-posts-controls">
                    <select onchange={on_status_change}>
                        <option value="all" selected={handle.blog.filters.status == StatusFilter::All}>
                            {"All"}
                        </option>
                        <option value="draft" selected={handle.blog.filters.status == StatusFilter::Draft}>
                            {"Drafts"}
                        </option>
                        <option value="published" selected={handle.blog.filters.status == StatusFilter::Published}>
                            {"Published"}
                        </option>
                    </select>
                    <Link to={Route::NewPost} class="btn btn-primary">{"New post"}</Link>
                </div>
            </div>

            {
                if handle.blog.is_loading {
                    html! { <div class="loading">{"Loading your posts..."}</div> }
                } else if handle.blog.my_posts.is_empty() {
                    html! {
                        <div class="empty-state">
                            <h2>{"Nothing here yet"}</h2>
                            <p>{"Write your first post to see it listed."}</p>
                        </div>
                    }
                } else {
                    html! { <div class="my-post-list">{ for rows }</div> }
                }
            }

            <PaginationControls pagination={handle.blog.pagination.clone()} {on_page} />
        </div>
    }
}
