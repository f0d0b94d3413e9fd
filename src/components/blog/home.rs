use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::app::Route;
use crate::components::blog::post_card::PostCard;
use crate::components::link::Link;
use crate::hooks::use_blog;

/// Landing page: featured strip plus the latest posts.
#[function_component(HomeView)]
pub fn home_view() -> Html {
    let handle = use_blog();

    {
        let store = handle.store.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = store.fetch_featured_posts().await;
                let query = store.query_for_page(1);
                let _ = store.fetch_posts(&query).await;
            });
            || ()
        });
    }

    html! {
        <div class="home-screen">
            <section class="hero">
                <h1>{"Stories worth reading"}</h1>
                <p>{"Read, write and share posts on the things you care about."}</p>
                <Link to={Route::Blog} class="btn btn-primary">{"Browse the blog"}</Link>
            </section>

            {
                if !handle.blog.featured_posts.is_empty() {
                    html! {
                        <section class="featured">
                            <h2>{"Featured"}</h2>
                            <div class="featured-strip">
                                {
                                    for handle.blog.featured_posts.iter().map(|post| html! {
                                        <PostCard key={post.id} post={post.clone()} />
                                    })
                                }
                            </div>
                        </section>
                    }
                } else {
                    html! {}
                }
            }

            <section class="recent">
                <h2>{"Latest posts"}</h2>
                {
                    if handle.blog.posts.is_empty() && !handle.blog.is_loading {
                        html! { <p class="empty-state">{"Nothing published yet."}</p> }
                    } else {
                        html! {
                            <div class="post-grid">
                                {
                                    for handle.blog.posts.iter().take(6).map(|post| html! {
                                        <PostCard key={post.id} post={post.clone()} />
                                    })
                                }
                            </div>
                        }
                    }
                }
            </section>
        </div>
    }
}
