use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::blog::pagination_controls::PaginationControls;
use crate::components::blog::post_card::PostCard;
use crate::hooks::use_blog;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaxonomyKind {
    Category,
    Tag,
}

#[derive(Properties, PartialEq)]
pub struct TaxonomyViewProps {
    pub kind: TaxonomyKind,
    pub id: u64,
}

/// Landing page for a single category or tag, fed by the dedicated
/// `/categories/{id}/posts/` and `/tags/{id}/posts/` endpoints.
#[function_component(TaxonomyView)]
pub fn taxonomy_view(props: &TaxonomyViewProps) -> Html {
    let handle = use_blog();

    {
        let store = handle.store.clone();
        use_effect_with((props.kind, props.id), move |(kind, id)| {
            let kind = *kind;
            let id = *id;
            spawn_local(async move {
                let _ = store.fetch_categories().await;
                let _ = store.fetch_tags().await;
                let _ = match kind {
                    TaxonomyKind::Category => store.fetch_category_posts(id, 1).await,
                    TaxonomyKind::Tag => store.fetch_tag_posts(id, 1).await,
                };
            });
            || ()
        });
    }

    let on_page = {
        let store = handle.store.clone();
        let kind = props.kind;
        let id = props.id;
        Callback::from(move |page: u32| {
            let store = store.clone();
            spawn_local(async move {
                let _ = match kind {
                    TaxonomyKind::Category => store.fetch_category_posts(id, page).await,
                    TaxonomyKind::Tag => store.fetch_tag_posts(id, page).await,
                };
            });
        })
    };

    let heading = match props.kind {
        TaxonomyKind::Category => handle
            .blog
            .categories
            .iter()
            .find(|c| c.id == props.id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Category".to_string()),
        TaxonomyKind::Tag => handle
            .blog
            .tags
            .iter()
            .find(|t| t.id == props.id)
            .map(|t| format!("#{}", t.name))
            .unwrap_or_else(|| "Tag".to_string()),
    };

    html! {
        <div class="taxonomy-screen">
            <h1>{ heading }</h1>

            {
                if handle.blog.is_loading {
                    html! { <div class="loading">{"Loading posts..."}</div> }
                } else if handle.blog.posts.is_empty() {
                    html! {
                        <div class="empty-state">
                            <h2>{"No posts yet"}</h2>
                            <p>{"Nothing has been published here so far."}</p>
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
