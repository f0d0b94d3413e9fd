use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::components::app::{Navigator, Route};
use crate::components::link::Link;
use crate::hooks::{use_auth, use_blog};
use crate::models::PostStatus;

#[derive(Properties, PartialEq)]
pub struct PostDetailProps {
    pub slug: String,
}

/// Detail view, reached by slug so direct navigation works even when the
/// listing cache has never seen the post. A missing post renders a
/// first-class empty state rather than an error page.
#[function_component(PostDetail)]
pub fn post_detail(props: &PostDetailProps) -> Html {
    let auth = use_auth();
    let handle = use_blog();
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");

    {
        let store = handle.store.clone();
        use_effect_with(props.slug.clone(), move |slug| {
            let slug = slug.clone();
            spawn_local(async move {
                let _ = store.fetch_post_by_slug(&slug).await;
            });
            || ()
        });
    }

    if handle.blog.is_loading {
        return html! { <div class="loading">{"Loading post..."}</div> };
    }

    let Some(post) = handle
        .blog
        .current_post
        .clone()
        .filter(|p| p.slug == props.slug)
    else {
        return html! {
            <div class="empty-state">
                <h2>{"Post not found"}</h2>
                <p>{"This post may have been removed or never existed."}</p>
                <Link to={Route::Blog} class="btn btn-primary">{"Back to the blog"}</Link>
            </div>
        };
    };

    let is_author = auth
        .auth
        .user
        .as_ref()
        .map(|user| post.is_authored_by(user))
        .unwrap_or(false);

    let author_controls = if is_author {
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
            let navigator = navigator.clone();
            let id = post.id;
            Callback::from(move |_: MouseEvent| {
                let confirmed = web_sys::window()
                    .and_then(|win| win.confirm_with_message("Delete this post?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                let store = store.clone();
                let navigator = navigator.clone();
                spawn_local(async move {
                    if store.delete_post(id).await.is_ok() {
                        navigator.push(Route::Blog);
                    }
                });
            })
        };

        html! {
            <div class="post-actions">
                <Link to={Route::EditPost { id: post.id }} class="btn">{"Edit"}</Link>
                <button class="btn" onclick={on_toggle_status}>
                    {
                        match post.status {
                            PostStatus::Draft => "Publish",
                            PostStatus::Published => "Unpublish",
                        }
                    }
                </button>
                <button
                    class="btn btn-danger"
                    disabled={handle.blog.is_deleting}
                    onclick={on_delete}
                >
                    {"Delete"}
                </button>
            </div>
        }
    } else {
        html! {}
    };

    let byline = post
        .author
        .as_ref()
        .map(|a| a.display_name())
        .unwrap_or_else(|| "Unknown author".to_string());
    let date = post
        .published_at
        .or(post.created_at)
        .map(|d| d.format("%B %e, %Y").to_string())
        .unwrap_or_default();

    html! {
        <article class="post-detail">
            <header>
                {
                    if post.status == PostStatus::Draft {
                        html! { <span class="badge badge-warn">{"draft"}</span> }
                    } else {
                        html! {}
                    }
                }
                <h1>{ &post.title }</h1>
                <div class="post-detail-meta">
                    <span>{ byline }</span>
                    <span>{ date }</span>
                    <span>{ format!("{} min read", post.reading_time.max(1)) }</span>
                    {
                        if let Some(category) = &post.category {
                            html! {
                                <Link to={Route::Category { id: category.id }} class="post-card-category">
                                    { category.name.clone() }
                                </Link>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
                { author_controls }
            </header>

            {
                if let Some(image) = &post.featured_image {
                    html! { <img class="post-detail-image" src={image.clone()} alt="" /> }
                } else {
                    html! {}
                }
            }

            <div class="post-content">
                { Html::from_html_unchecked(AttrValue::from(post.content.clone())) }
            </div>

            <footer class="post-detail-tags">
                {
                    for post.tags.iter().map(|tag| html! {
                        <Link to={Route::Tag { id: tag.id }} class="tag-chip">
                            { format!("#{}", tag.name) }
                        </Link>
                    })
                }
            </footer>
        </article>
    }
}
